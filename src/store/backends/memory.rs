//! In-memory user store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::store::{
    password_digest, NewUser, StoreError, StoreProvider, StoreResult, UserStore,
};

const DUPLICATE_USER: &str = "User already registered";

/// Registered account as kept by the memory backend
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub fiscal_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
}

type UserTable = Arc<RwLock<HashMap<String, UserRecord>>>;

/// Provider whose sessions all share one in-process user table
#[derive(Clone, Default)]
pub struct MemoryStoreProvider {
    users: UserTable,
}

impl MemoryStoreProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered accounts
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Look up an account by email
    pub async fn find(&self, email: &str) -> Option<UserRecord> {
        self.users.read().await.get(email).cloned()
    }
}

#[async_trait]
impl StoreProvider for MemoryStoreProvider {
    async fn open(&self) -> StoreResult<Box<dyn UserStore>> {
        Ok(Box::new(MemoryUserStore {
            users: self.users.clone(),
        }))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Session over the shared memory table
pub struct MemoryUserStore {
    users: UserTable,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn user_exists(&self, email: &str, password: &str) -> StoreResult<bool> {
        let users = self.users.read().await;
        let digest = password_digest(password);
        Ok(users
            .get(email)
            .is_some_and(|record| record.password_hash == digest))
    }

    async fn register_user(&self, user: NewUser) -> StoreResult<()> {
        let mut users = self.users.write().await;

        let taken = users.contains_key(&user.email)
            || users
                .values()
                .any(|record| record.fiscal_code == user.fiscal_code);
        if taken {
            return Err(StoreError::conflict(DUPLICATE_USER));
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            fiscal_code: user.fiscal_code,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email.clone(),
            password_hash: password_digest(&user.password),
            registered_at: Utc::now(),
        };
        debug!(user_id = %record.id, "registered user");
        users.insert(user.email, record);
        Ok(())
    }

    async fn close(self: Box<Self>) -> StoreResult<()> {
        Ok(())
    }
}
