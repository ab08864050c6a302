//! Inbound request model

use serde_json::{Map, Value};
use std::fmt;

/// Decoded JSON body of a request
pub type Payload = Map<String, Value>;

/// HTTP verb of an inbound request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Other(verb) => verb,
        }
    }
}

impl From<&str> for HttpMethod {
    fn from(verb: &str) -> Self {
        match verb.to_ascii_uppercase().as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "PATCH" => HttpMethod::Patch,
            "HEAD" => HttpMethod::Head,
            "OPTIONS" => HttpMethod::Options,
            other => HttpMethod::Other(other.to_string()),
        }
    }
}

impl From<&axum::http::Method> for HttpMethod {
    fn from(method: &axum::http::Method) -> Self {
        HttpMethod::from(method.as_str())
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inbound call: built once, read-only afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: HttpMethod,
    operation: String,
    payload: Payload,
}

impl Request {
    pub fn new(method: HttpMethod, operation: impl Into<String>, payload: Payload) -> Self {
        Self {
            method,
            operation: operation.into(),
            payload,
        }
    }

    /// Builds a request from a JSON value; anything but an object yields an empty payload
    pub fn from_json(method: HttpMethod, operation: impl Into<String>, body: Value) -> Self {
        let payload = match body {
            Value::Object(map) => map,
            _ => Payload::new(),
        };
        Self::new(method, operation, payload)
    }

    pub fn method(&self) -> &HttpMethod {
        &self.method
    }

    /// Operation name exactly as it arrived
    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}
