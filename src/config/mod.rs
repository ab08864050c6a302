//! Server configuration
//!
//! Values are layered: built-in defaults, then a TOML file, then
//! `COMPLIANCE_API_*` environment variables, then command-line flags.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

use crate::dispatch::{AllowList, Dispatcher, Operation, UnknownOperationPolicy};

pub mod loader;

pub use loader::{default_config_path, ConfigLoader, CONFIG_FILE_NAME};

pub const ENV_BIND: &str = "COMPLIANCE_API_BIND";
pub const ENV_PORT: &str = "COMPLIANCE_API_PORT";
pub const ENV_LOG_LEVEL: &str = "COMPLIANCE_API_LOG_LEVEL";
pub const ENV_CORS: &str = "COMPLIANCE_API_CORS";
pub const ENV_UNKNOWN_OPERATION: &str = "COMPLIANCE_API_UNKNOWN_OPERATION";
pub const ENV_ALLOWED_OPERATIONS: &str = "COMPLIANCE_API_ALLOWED_OPERATIONS";
pub const ENV_DATABASE_URL: &str = "COMPLIANCE_API_DATABASE_URL";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

impl ConfigError {
    fn invalid(key: &str, value: &str) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Which user store backs the server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    #[default]
    Memory,
    Postgres {
        database_url: String,
        #[serde(default = "default_max_connections")]
        max_connections: u32,
    },
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    pub cors: bool,
    pub unknown_operation: UnknownOperationPolicy,
    pub allowed_operations: Vec<Operation>,
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            log_level: None,
            cors: false,
            unknown_operation: UnknownOperationPolicy::Silent,
            allowed_operations: Operation::ALL.to_vec(),
            store: StoreConfig::Memory,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Effective configuration rendered back as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply `COMPLIANCE_API_*` overrides from the process environment
    pub fn merge_env_vars(&mut self) -> Result<(), ConfigError> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(ENV_BIND) {
            self.bind_address = bind;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(ENV_PORT, &port))?;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = Some(level);
        }

        if let Some(cors) = lookup(ENV_CORS) {
            self.cors = cors
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(ENV_CORS, &cors))?;
        }

        if let Some(policy) = lookup(ENV_UNKNOWN_OPERATION) {
            self.unknown_operation = parse_policy(&policy)
                .ok_or_else(|| ConfigError::invalid(ENV_UNKNOWN_OPERATION, &policy))?;
        }

        if let Some(names) = lookup(ENV_ALLOWED_OPERATIONS) {
            self.allowed_operations = parse_operations(&names)?;
        }

        if let Some(database_url) = lookup(ENV_DATABASE_URL) {
            let max_connections = match &self.store {
                StoreConfig::Postgres {
                    max_connections, ..
                } => *max_connections,
                StoreConfig::Memory => default_max_connections(),
            };
            self.store = StoreConfig::Postgres {
                database_url,
                max_connections,
            };
        }

        Ok(())
    }

    pub fn allow_list(&self) -> AllowList {
        AllowList::from_operations(self.allowed_operations.iter().copied())
    }

    /// Dispatcher configured from this file
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.allow_list()).with_unknown_operation_policy(self.unknown_operation)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|_| ConfigError::invalid("bind_address", &self.bind_address))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn parse_policy(value: &str) -> Option<UnknownOperationPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "silent" => Some(UnknownOperationPolicy::Silent),
        "not_found" | "not-found" | "404" => Some(UnknownOperationPolicy::NotFound),
        _ => None,
    }
}

fn parse_operations(names: &str) -> Result<Vec<Operation>, ConfigError> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            Operation::from_name(name).ok_or_else(|| ConfigError::UnknownOperation(name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.unknown_operation, UnknownOperationPolicy::Silent);
        assert_eq!(config.allow_list(), AllowList::all());
        assert_eq!(config.store, StoreConfig::Memory);
        assert_eq!(
            config.socket_addr().unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = ServerConfig::from_toml_str(
            r#"
            port = 9000
            unknown_operation = "not_found"
            allowed_operations = ["user", "tickets"]

            [store]
            backend = "postgres"
            database_url = "postgres://localhost/compliance"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.unknown_operation, UnknownOperationPolicy::NotFound);
        assert_eq!(
            config.allowed_operations,
            vec![Operation::User, Operation::Tickets]
        );
        assert_eq!(
            config.store,
            StoreConfig::Postgres {
                database_url: "postgres://localhost/compliance".to_string(),
                max_connections: 5,
            }
        );
    }

    #[test]
    fn test_unknown_operation_in_toml_is_rejected() {
        let result = ServerConfig::from_toml_str(r#"allowed_operations = ["user", "processRequest"]"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServerConfig::default();
        config
            .merge_env_from(env(&[
                (ENV_BIND, "0.0.0.0"),
                (ENV_PORT, "3000"),
                (ENV_LOG_LEVEL, "debug"),
                (ENV_CORS, "true"),
                (ENV_UNKNOWN_OPERATION, "not_found"),
                (ENV_ALLOWED_OPERATIONS, "user, settings"),
            ]))
            .unwrap();

        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.cors);
        assert_eq!(config.unknown_operation, UnknownOperationPolicy::NotFound);
        assert_eq!(
            config.allow_list(),
            AllowList::empty()
                .allow(Operation::User)
                .allow(Operation::Settings)
        );
    }

    #[test]
    fn test_env_database_url_switches_store() {
        let mut config = ServerConfig::default();
        config
            .merge_env_from(env(&[(ENV_DATABASE_URL, "postgres://db/compliance")]))
            .unwrap();
        assert_eq!(
            config.store,
            StoreConfig::Postgres {
                database_url: "postgres://db/compliance".to_string(),
                max_connections: 5,
            }
        );
    }

    #[test]
    fn test_invalid_env_values() {
        let mut config = ServerConfig::default();
        let err = config
            .merge_env_from(env(&[(ENV_PORT, "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_PORT));

        let err = config
            .merge_env_from(env(&[(ENV_ALLOWED_OPERATIONS, "user,close")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOperation(ref name) if name == "close"));

        let err = config
            .merge_env_from(env(&[(ENV_UNKNOWN_OPERATION, "explode")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_invalid_bind_address() {
        let config = ServerConfig {
            bind_address: "not an ip".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = ServerConfig {
            log_level: Some("trace".to_string()),
            allowed_operations: vec![Operation::User],
            ..ServerConfig::default()
        };
        let rendered = config.to_toml().unwrap();
        assert_eq!(ServerConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_dispatcher_from_config() {
        let config = ServerConfig {
            unknown_operation: UnknownOperationPolicy::NotFound,
            allowed_operations: vec![Operation::User],
            ..ServerConfig::default()
        };
        let dispatcher = config.dispatcher();
        assert_eq!(
            dispatcher.unknown_operation_policy(),
            UnknownOperationPolicy::NotFound
        );
        assert!(dispatcher.allow_list().contains(Operation::User));
        assert!(!dispatcher.allow_list().contains(Operation::Settings));
    }
}
