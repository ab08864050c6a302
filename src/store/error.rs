//! Error types for the user store

use std::fmt;
use thiserror::Error;

use crate::error::HttpStatus;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Could not open or keep a connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// Write conflicts with an existing record
    #[error("{0}")]
    Conflict(String),

    /// Backend refused the operation with an explicit status
    #[error("{message}")]
    Rejected { message: String, code: u16 },

    /// Backend cannot be built from the given configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Create a database error
    pub fn database<E: fmt::Display>(err: E) -> Self {
        Self::Database(err.to_string())
    }

    /// Create a connection error
    pub fn connection<E: fmt::Display>(err: E) -> Self {
        Self::Connection(err.to_string())
    }

    /// Create a conflict error
    pub fn conflict<E: fmt::Display>(msg: E) -> Self {
        Self::Conflict(msg.to_string())
    }

    /// Create an error that carries its own HTTP status
    pub fn rejected<E: fmt::Display>(code: u16, msg: E) -> Self {
        Self::Rejected {
            message: msg.to_string(),
            code,
        }
    }

    /// Create a configuration error
    pub fn configuration<E: fmt::Display>(msg: E) -> Self {
        Self::Configuration(msg.to_string())
    }

    /// Status code this error asks to be rendered with, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Conflict(_) => Some(HttpStatus::CONFLICT),
            Self::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }
}
