use thiserror::Error;

use crate::dispatch::HttpMethod;
use crate::store::StoreError;

pub mod codes;

pub use codes::{resolve_status, HttpStatus};

/// Message rendered for every payload that fails key validation.
///
/// Callers never learn which key was missing.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid JSON input parameters";

/// Failures raised while a dispatched operation runs.
///
/// All of them are caught at the dispatch boundary and rendered as
/// `{"success": false, "error": <Display>}` with [`ApiError::status_code`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Persistence { message: String, code: Option<u16> },

    #[error("")]
    UnsupportedMethod { method: HttpMethod },

    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },
}

impl ApiError {
    /// Create the generic payload validation failure
    pub fn invalid_input() -> Self {
        Self::Validation {
            message: INVALID_INPUT_MESSAGE.to_string(),
        }
    }

    /// Create a persistence failure with the default status
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
            code: None,
        }
    }

    /// Create a persistence failure carrying its own status code
    pub fn persistence_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
            code: Some(code),
        }
    }

    pub fn unsupported_method(method: HttpMethod) -> Self {
        Self::UnsupportedMethod { method }
    }

    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation { name: name.into() }
    }

    /// Status code explicitly attached to this failure, if any
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Persistence { code, .. } => *code,
            _ => None,
        }
    }

    fn default_status(&self) -> u16 {
        match self {
            Self::Validation { .. } | Self::Persistence { .. } | Self::UnsupportedMethod { .. } => {
                HttpStatus::BAD_REQUEST
            }
            Self::UnknownOperation { .. } => HttpStatus::NOT_FOUND,
        }
    }

    /// Status the error envelope is rendered with
    pub fn status_code(&self) -> u16 {
        resolve_status(self.code(), self.default_status())
    }

    /// Short label used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Persistence { .. } => "persistence",
            Self::UnsupportedMethod { .. } => "unsupported_method",
            Self::UnknownOperation { .. } => "unknown_operation",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Persistence {
            code: err.status_code(),
            message: err.to_string(),
        }
    }
}
