//! Terminal output of a dispatched request

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod http;

pub use http::HttpRenderer;

/// Sink for the single response a dispatched request produces
pub trait Renderer: Send {
    /// Render a success; `None` renders an empty success envelope
    fn render(&mut self, value: Option<Value>, status: u16);

    /// Render an error envelope
    fn render_error(&mut self, message: &str, status: u16);
}

/// JSON body shared by success and error responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn success(result: Option<Value>) -> Self {
        Self {
            success: true,
            result,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(message.into()),
        }
    }
}
