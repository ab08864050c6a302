//! Request dispatch
//!
//! Resolves `(method, operation, payload)` to a handler, runs it and renders
//! exactly one envelope. Only operations in the [`AllowList`] are ever
//! dispatched; everything a handler raises is caught in [`Dispatcher::execute`]
//! and rendered as an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ApiError, HttpStatus};
use crate::render::Renderer;
use crate::store::{StoreProvider, UserStore};

pub mod handlers;
pub mod operation;
pub mod request;

pub use handlers::{handler_for, HandlerResult, OperationHandler};
pub use operation::{AllowList, Operation};
pub use request::{HttpMethod, Payload, Request};

/// What happens to a request whose operation is not allow-listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownOperationPolicy {
    /// Render nothing at all
    #[default]
    Silent,
    /// Render an error envelope with 404
    NotFound,
}

/// Terminal state a request reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// A success envelope was rendered
    Rendered,
    /// An error envelope was rendered
    ErrorRendered,
    /// The operation was not allow-listed and nothing was rendered
    Rejected,
}

/// Stateless dispatcher shared by all requests
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    allow_list: AllowList,
    unknown_operation: UnknownOperationPolicy,
}

impl Dispatcher {
    pub fn new(allow_list: AllowList) -> Self {
        Self {
            allow_list,
            unknown_operation: UnknownOperationPolicy::default(),
        }
    }

    pub fn with_unknown_operation_policy(mut self, policy: UnknownOperationPolicy) -> Self {
        self.unknown_operation = policy;
        self
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    pub fn unknown_operation_policy(&self) -> UnknownOperationPolicy {
        self.unknown_operation
    }

    /// Allow-listed operation named by the request, if any
    pub fn resolve(&self, request: &Request) -> Option<Operation> {
        self.allow_list.resolve(request.operation())
    }

    /// Dispatch a request against an already open store session
    pub async fn handle(
        &self,
        request: &Request,
        store: &dyn UserStore,
        renderer: &mut dyn Renderer,
    ) -> Disposition {
        match self.resolve(request) {
            Some(operation) => self.execute(operation, request, store, renderer).await,
            None => self.reject(request, renderer),
        }
    }

    /// Dispatch a request, opening a store session for it and closing that
    /// session before returning. Rejected requests never open a session.
    pub async fn process<P>(
        &self,
        request: &Request,
        provider: &P,
        renderer: &mut dyn Renderer,
    ) -> Disposition
    where
        P: StoreProvider + ?Sized,
    {
        let Some(operation) = self.resolve(request) else {
            return self.reject(request, renderer);
        };

        let store = match provider.open().await {
            Ok(store) => store,
            Err(e) => {
                warn!(backend = provider.backend(), error = %e, "failed to open store session");
                return self.render_failure(ApiError::from(e), renderer);
            }
        };

        let disposition = self
            .execute(operation, request, store.as_ref(), renderer)
            .await;

        if let Err(e) = store.close().await {
            warn!(backend = provider.backend(), error = %e, "failed to close store session");
        }

        disposition
    }

    async fn execute(
        &self,
        operation: Operation,
        request: &Request,
        store: &dyn UserStore,
        renderer: &mut dyn Renderer,
    ) -> Disposition {
        debug!(%operation, method = %request.method(), "dispatching request");

        match handler_for(operation)
            .handle(request.method(), request.payload(), store)
            .await
        {
            Ok(result) => {
                renderer.render(result, HttpStatus::OK);
                Disposition::Rendered
            }
            Err(err) => self.render_failure(err, renderer),
        }
    }

    fn render_failure(&self, err: ApiError, renderer: &mut dyn Renderer) -> Disposition {
        let status = err.status_code();
        debug!(kind = err.kind(), status, error = %err, "request failed");
        renderer.render_error(&err.to_string(), status);
        Disposition::ErrorRendered
    }

    fn reject(&self, request: &Request, renderer: &mut dyn Renderer) -> Disposition {
        match self.unknown_operation {
            UnknownOperationPolicy::Silent => {
                debug!(operation = request.operation(), "operation not allow-listed; ignoring");
                Disposition::Rejected
            }
            UnknownOperationPolicy::NotFound => {
                self.render_failure(ApiError::unknown_operation(request.operation()), renderer)
            }
        }
    }
}
