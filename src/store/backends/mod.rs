//! User store backends

use std::sync::Arc;
use tracing::info;

use super::{StoreProvider, StoreResult};
use crate::config::StoreConfig;

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::{MemoryStoreProvider, MemoryUserStore};
#[cfg(feature = "postgres")]
pub use postgres::{PostgresStoreProvider, PostgresUserStore};

/// Build the provider selected by the configuration
pub async fn create_provider(config: &StoreConfig) -> StoreResult<Arc<dyn StoreProvider>> {
    match config {
        StoreConfig::Memory => {
            info!("Using in-memory user store");
            Ok(Arc::new(MemoryStoreProvider::new()))
        }
        #[cfg(feature = "postgres")]
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let provider = PostgresStoreProvider::connect(database_url, *max_connections).await?;
            Ok(Arc::new(provider))
        }
        #[cfg(not(feature = "postgres"))]
        StoreConfig::Postgres { .. } => Err(super::StoreError::configuration(
            "postgres store requested but the `postgres` feature is not enabled",
        )),
    }
}
