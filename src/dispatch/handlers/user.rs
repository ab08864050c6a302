//! `user` operation: login check and registration

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use super::{HandlerResult, OperationHandler};
use crate::dispatch::{HttpMethod, Operation, Payload};
use crate::error::ApiError;
use crate::store::{Credentials, NewUser, UserStore};
use crate::validation;

/// Handler for `/api/user`.
///
/// - `GET`/`POST {email, password}` → `{"exists": bool}`
/// - `PUT {fiscalCode, firstName, lastName, email, password}` → no result
/// - anything else → unsupported method
pub struct UserHandler;

impl UserHandler {
    async fn login(&self, payload: &Payload, store: &dyn UserStore) -> HandlerResult {
        let credentials: Credentials = validation::decode(payload)?;

        let exists = store
            .user_exists(&credentials.email, &credentials.password)
            .await
            .map_err(|e| {
                warn!(error = %e, "user lookup failed");
                ApiError::from(e)
            })?;

        Ok(Some(json!({ "exists": exists })))
    }

    async fn register(&self, payload: &Payload, store: &dyn UserStore) -> HandlerResult {
        let user: NewUser = validation::decode(payload)?;

        store.register_user(user).await.map_err(|e| {
            warn!(error = %e, "user registration failed");
            ApiError::from(e)
        })?;

        debug!("user registered");
        Ok(None)
    }
}

#[async_trait]
impl OperationHandler for UserHandler {
    fn operation(&self) -> Operation {
        Operation::User
    }

    async fn handle(
        &self,
        method: &HttpMethod,
        payload: &Payload,
        store: &dyn UserStore,
    ) -> HandlerResult {
        // Every key is checked before the store sees anything
        validation::validate(Operation::User, method, payload)?;

        match method {
            HttpMethod::Get | HttpMethod::Post => self.login(payload, store).await,
            HttpMethod::Put => self.register(payload, store).await,
            other => Err(ApiError::unsupported_method(other.clone())),
        }
    }

    fn description(&self) -> &str {
        "Checks login credentials (GET/POST) and registers accounts (PUT)"
    }
}
