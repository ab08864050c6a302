use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::{ConfigError, ServerConfig};

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `config.toml` in the platform config directory, e.g.
/// `~/.config/compliance-api/config.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "compliance", "compliance-api")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub struct ConfigLoader {
    explicit_path: Option<PathBuf>,
    default_path: Option<PathBuf>,
    read_env: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            explicit_path: None,
            default_path: default_config_path(),
            read_env: true,
        }
    }

    /// Read this file instead of the default one; it must exist
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_path = Some(path.into());
        self
    }

    pub fn with_optional_path(self, path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => self.with_path(path),
            None => self,
        }
    }

    pub fn without_default_path(mut self) -> Self {
        self.default_path = None;
        self
    }

    pub fn without_env(mut self) -> Self {
        self.read_env = false;
        self
    }

    pub async fn load(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match (&self.explicit_path, &self.default_path) {
            (Some(path), _) => Self::read(path).await?,
            (None, Some(path)) if fs::try_exists(path).await.unwrap_or(false) => {
                Self::read(path).await?
            }
            _ => ServerConfig::default(),
        };

        if self.read_env {
            config.merge_env_vars()?;
        }

        Ok(config)
    }

    async fn read(path: &Path) -> Result<ServerConfig, ConfigError> {
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        ServerConfig::from_toml_str(&content)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
