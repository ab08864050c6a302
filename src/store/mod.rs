//! Persistence capabilities consumed by the dispatcher
//!
//! The dispatcher never talks to a database directly. It asks a
//! [`StoreProvider`] for a [`UserStore`] session at the start of a request,
//! uses it for at most one call, and closes it before the request ends.
//! Every call returns a [`StoreResult`], so a failure cannot be overlooked.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub mod backends;
pub mod error;

pub use backends::{create_provider, MemoryStoreProvider, MemoryUserStore};
pub use error::{StoreError, StoreResult};

/// Login credentials as carried by the `user` GET/POST payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration data as carried by the `user` PUT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub fiscal_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// A store session scoped to a single request
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Check whether an account with these credentials exists
    async fn user_exists(&self, email: &str, password: &str) -> StoreResult<bool>;

    /// Register a new account
    async fn register_user(&self, user: NewUser) -> StoreResult<()>;

    /// Release the session; called exactly once when the request ends
    async fn close(self: Box<Self>) -> StoreResult<()>;
}

/// Hands out one [`UserStore`] session per request
#[async_trait]
pub trait StoreProvider: Send + Sync {
    async fn open(&self) -> StoreResult<Box<dyn UserStore>>;

    /// Backend name for logs
    fn backend(&self) -> &'static str;
}

/// Hex-encoded SHA-256 digest under which passwords are stored
pub fn password_digest(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}
