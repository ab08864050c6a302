//! Recording renderer

use serde_json::Value;

use crate::render::{Envelope, Renderer};

/// One render call
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Value { value: Option<Value>, status: u16 },
    Error { message: String, status: u16 },
}

impl Rendered {
    pub fn status(&self) -> u16 {
        match self {
            Rendered::Value { status, .. } | Rendered::Error { status, .. } => *status,
        }
    }

    /// Envelope this render would put on the wire
    pub fn envelope(&self) -> Envelope {
        match self {
            Rendered::Value { value, .. } => Envelope::success(value.clone()),
            Rendered::Error { message, .. } => Envelope::failure(message.clone()),
        }
    }
}

/// Renderer that keeps every call instead of writing a response
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    renders: Vec<Rendered>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(&self) -> Vec<Rendered> {
        self.renders.clone()
    }

    pub fn render_count(&self) -> usize {
        self.renders.len()
    }

    pub fn last(&self) -> Option<&Rendered> {
        self.renders.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, value: Option<Value>, status: u16) {
        self.renders.push(Rendered::Value { value, status });
    }

    fn render_error(&mut self, message: &str, status: u16) {
        self.renders.push(Rendered::Error {
            message: message.to_string(),
            status,
        });
    }
}
