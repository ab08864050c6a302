//! Required-key validation for request payloads
//!
//! Validation runs before any store call, so a rejected payload never causes a
//! partial side effect. The failure message is fixed and generic; the key that
//! was missing only shows up in debug logs.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::dispatch::{HttpMethod, Operation, Payload};
use crate::error::ApiError;

pub mod schema;

pub use schema::{required_keys, LOGIN_KEYS, REGISTER_KEYS};

/// Fail unless every key in `keys` is present in `payload`.
///
/// A key mapped to JSON `null` counts as present.
pub fn require_keys(payload: &Payload, keys: &[&str]) -> Result<(), ApiError> {
    match keys.iter().find(|key| !payload.contains_key(**key)) {
        Some(missing) => {
            debug!(key = %missing, "required payload key missing");
            Err(ApiError::invalid_input())
        }
        None => Ok(()),
    }
}

/// Check `payload` against the table entry for `(operation, method)`
pub fn validate(operation: Operation, method: &HttpMethod, payload: &Payload) -> Result<(), ApiError> {
    match required_keys(operation, method) {
        Some(keys) => require_keys(payload, keys),
        None => Ok(()),
    }
}

/// Decode an already validated payload into a typed value.
///
/// Type mismatches (e.g. a number where a string is expected) are reported
/// with the same generic message as missing keys.
pub fn decode<T: DeserializeOwned>(payload: &Payload) -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(payload.clone())).map_err(|e| {
        debug!(error = %e, "payload does not match the expected shape");
        ApiError::invalid_input()
    })
}
