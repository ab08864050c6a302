//! Testing utilities
//!
//! Mocks for the collaborators around the dispatcher, shared by unit tests,
//! integration tests and benches.

pub mod mocks;

pub use mocks::{MockStoreProvider, MockUserStore, RecordingRenderer, Rendered, StoreCall};
