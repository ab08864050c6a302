//! Reserved operations: routed and allow-listed, but with no behavior yet

use async_trait::async_trait;

use super::{HandlerResult, OperationHandler};
use crate::dispatch::{HttpMethod, Operation, Payload};
use crate::store::UserStore;

/// Handler for an operation kept as an extension point.
///
/// Accepts any method and payload, never touches the store and produces no
/// result, which renders as an empty success.
pub struct ReservedHandler {
    operation: Operation,
}

impl ReservedHandler {
    pub const fn new(operation: Operation) -> Self {
        Self { operation }
    }
}

#[async_trait]
impl OperationHandler for ReservedHandler {
    fn operation(&self) -> Operation {
        self.operation
    }

    async fn handle(
        &self,
        _method: &HttpMethod,
        _payload: &Payload,
        _store: &dyn UserStore,
    ) -> HandlerResult {
        Ok(None)
    }

    fn description(&self) -> &str {
        "Reserved for future implementation"
    }
}
