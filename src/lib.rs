//! # compliance-api
//!
//! REST dispatch layer for the compliance tracking service.
//!
//! An inbound `(method, operation, JSON body)` triple is resolved against a
//! closed, allow-listed set of operations, its payload is checked for
//! required keys before anything else happens, validated data goes to the
//! user store, and exactly one JSON envelope is rendered back.
//!
//! ## Modules
//!
//! - `dispatch` - Operation enum, allow-list, handlers and the dispatcher
//! - `validation` - Required-key checks and the per-operation key table
//! - `store` - User store capability traits and backends
//! - `render` - Response envelope and renderers
//! - `server` - axum transport for `/api/{operation}`
//! - `config` - Layered server configuration
//! - `error` - Failure taxonomy and status resolution
//! - `testing` - Recording mocks for the store and renderer
pub mod config;
pub mod dispatch;
pub mod error;
pub mod render;
pub mod server;
pub mod store;
pub mod validation;

pub mod testing;
