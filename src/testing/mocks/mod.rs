//! Mock implementations for testing
//!
//! Recording stand-ins for the store and render collaborators.

pub mod renderer;
pub mod store;

pub use renderer::{RecordingRenderer, Rendered};
pub use store::{MockStoreProvider, MockUserStore, StoreCall};
