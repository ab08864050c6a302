//! HTTP transport for the dispatcher

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::Method,
    response::{IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::dispatch::{Dispatcher, HttpMethod, Payload, Request};
use crate::render::{Envelope, HttpRenderer};
use crate::store::StoreProvider;

/// API server wiring the dispatcher to `/api/{operation}`
pub struct ApiServer {
    dispatcher: Arc<Dispatcher>,
    provider: Arc<dyn StoreProvider>,
    cors: bool,
}

impl ApiServer {
    pub fn new(dispatcher: Dispatcher, provider: Arc<dyn StoreProvider>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            provider,
            cors: false,
        }
    }

    pub fn from_config(config: &ServerConfig, provider: Arc<dyn StoreProvider>) -> Self {
        Self::new(config.dispatcher(), provider).with_cors(config.cors)
    }

    pub fn with_cors(mut self, cors: bool) -> Self {
        self.cors = cors;
        self
    }

    /// Bind `addr` and serve until the process stops
    pub async fn start(self, addr: std::net::SocketAddr) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        info!(
            "Starting compliance API server on {} ({} store)",
            listener.local_addr()?,
            self.provider.backend()
        );
        axum::serve(listener, self.router()).await?;
        Ok(())
    }

    /// Build API router
    pub fn router(self) -> Router {
        let shared_state = Arc::new(ApiState {
            dispatcher: self.dispatcher,
            provider: self.provider,
        });

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/api/{operation}", any(dispatch_operation))
            .with_state(shared_state);

        if self.cors {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }
}

/// Shared API state
struct ApiState {
    dispatcher: Arc<Dispatcher>,
    provider: Arc<dyn StoreProvider>,
}

async fn health_check() -> Json<Envelope> {
    Json(Envelope::success(Some(json!({ "status": "ok" }))))
}

async fn dispatch_operation(
    State(state): State<Arc<ApiState>>,
    method: Method,
    Path(operation): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let payload = match body {
        Ok(body) => decode_payload(&body),
        Err(rejection) => {
            debug!(
                status = %rejection.status(),
                error = %rejection.body_text(),
                "request body not readable"
            );
            Payload::new()
        }
    };
    let request = Request::new(HttpMethod::from(&method), operation, payload);
    let mut renderer = HttpRenderer::new();

    let disposition = state
        .dispatcher
        .process(&request, state.provider.as_ref(), &mut renderer)
        .await;
    debug!(operation = request.operation(), ?disposition, "request finished");

    renderer.into_response()
}

/// Decode a request body into a payload.
///
/// Empty, malformed or non-object bodies all decode to an empty payload, so
/// any required key is then reported missing by validation. Bodies the
/// transport refuses to buffer (over axum's default size limit) take the same
/// path in `dispatch_operation`.
pub fn decode_payload(body: &[u8]) -> Payload {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Payload::new();
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            debug!("request body is not a JSON object");
            Payload::new()
        }
        Err(e) => {
            debug!(error = %e, "request body is not valid JSON");
            Payload::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_object() {
        let payload = decode_payload(br#"{"email": "a@b.com", "password": "x"}"#);
        assert_eq!(payload.len(), 2);
        assert_eq!(payload["email"], json!("a@b.com"));
    }

    #[test]
    fn test_decode_empty_body() {
        assert!(decode_payload(b"").is_empty());
        assert!(decode_payload(b"  \n").is_empty());
    }

    #[test]
    fn test_decode_malformed_or_non_object() {
        assert!(decode_payload(b"{\"email\":").is_empty());
        assert!(decode_payload(b"[1, 2]").is_empty());
        assert!(decode_payload(b"null").is_empty());
        assert!(decode_payload(b"\"user\"").is_empty());
    }
}
