//! Renderer that produces an axum response

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::Value;
use tracing::warn;

use super::{Envelope, Renderer};

/// Collects the rendered envelope and turns it into an HTTP response.
///
/// Nothing rendered (silent rejection) becomes `200 OK` with an empty body.
#[derive(Debug, Default)]
pub struct HttpRenderer {
    rendered: Option<(StatusCode, Envelope)>,
}

impl HttpRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered.is_some()
    }

    fn store(&mut self, status: u16, envelope: Envelope) {
        if self.rendered.is_some() {
            warn!(status, "response already rendered; ignoring second render");
            return;
        }
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST);
        self.rendered = Some((status, envelope));
    }
}

impl Renderer for HttpRenderer {
    fn render(&mut self, value: Option<Value>, status: u16) {
        self.store(status, Envelope::success(value));
    }

    fn render_error(&mut self, message: &str, status: u16) {
        self.store(status, Envelope::failure(message));
    }
}

impl IntoResponse for HttpRenderer {
    fn into_response(self) -> Response {
        match self.rendered {
            Some((status, envelope)) => (status, Json(envelope)).into_response(),
            None => StatusCode::OK.into_response(),
        }
    }
}
