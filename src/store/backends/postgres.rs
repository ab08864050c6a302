//! PostgreSQL user store

use async_trait::async_trait;
use chrono::Utc;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Postgres;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::store::{
    password_digest, NewUser, StoreError, StoreProvider, StoreResult, UserStore,
};

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    fiscal_code TEXT NOT NULL UNIQUE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    registered_at TIMESTAMPTZ NOT NULL
)
"#;

/// Provider backed by a PostgreSQL connection pool
pub struct PostgresStoreProvider {
    pool: PgPool,
}

impl PostgresStoreProvider {
    /// Connect and make sure the `users` table exists
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        info!("Initializing PostgreSQL user store");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await
            .map_err(|e| StoreError::connection(format!("Failed to connect to database: {e}")))?;

        sqlx::query(CREATE_USERS_TABLE)
            .execute(&pool)
            .await
            .map_err(StoreError::database)?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreProvider for PostgresStoreProvider {
    async fn open(&self) -> StoreResult<Box<dyn UserStore>> {
        let conn = self.pool.acquire().await.map_err(StoreError::connection)?;
        Ok(Box::new(PostgresUserStore {
            conn: Mutex::new(conn),
        }))
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Session holding one pooled connection for the length of a request
pub struct PostgresUserStore {
    conn: Mutex<PoolConnection<Postgres>>,
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn user_exists(&self, email: &str, password: &str) -> StoreResult<bool> {
        let mut conn = self.conn.lock().await;
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND password_hash = $2)",
        )
        .bind(email)
        .bind(password_digest(password))
        .fetch_one(&mut **conn)
        .await
        .map_err(StoreError::database)
    }

    async fn register_user(&self, user: NewUser) -> StoreResult<()> {
        let mut conn = self.conn.lock().await;
        let id = Uuid::new_v4();
        let result = sqlx::query(
            "INSERT INTO users (id, fiscal_code, first_name, last_name, email, password_hash, registered_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(&user.fiscal_code)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(password_digest(&user.password))
        .bind(Utc::now())
        .execute(&mut **conn)
        .await;

        match result {
            Ok(_) => {
                debug!(user_id = %id, "registered user");
                Ok(())
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::conflict("User already registered"))
            }
            Err(e) => Err(StoreError::database(e)),
        }
    }

    async fn close(self: Box<Self>) -> StoreResult<()> {
        // Dropping the pooled connection hands it back to the pool
        drop(self.conn.into_inner());
        Ok(())
    }
}
