//! FocusUp Shared Library
//!
//! This crate contains the task records, the task store and the
//! productivity metrics engine used by the CLI app and the WASM bindings.
//! Nothing here performs I/O.

pub mod errors;
pub mod models;
pub mod productivity_metrics;
pub mod task_store;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use productivity_metrics::*;
pub use task_store::TaskStore;
pub use types::*;
