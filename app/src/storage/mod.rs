//! Durable string-keyed blob storage
//!
//! Every record is stored whole under a fixed key as a JSON document.
//! [`BlobStore`] is the substrate; [`Persistence`] layers typed
//! load/save with default fallback on top of it.

mod file;
mod memory;
mod persistence;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;
pub use persistence::Persistence;

use focusup_shared::AppResult;

/// Fixed storage keys
pub mod keys {
    pub const TASKS: &str = "focusup_tasks";
    pub const PROFILE: &str = "focusup_profile";
    pub const SETTINGS: &str = "focusup_settings";
    pub const STATS: &str = "focusup_stats";
    pub const THEME: &str = "theme";
    pub const CREDENTIALS: &str = "focusup_credentials";

    /// Every key the app writes
    pub const ALL: &[&str] = &[TASKS, PROFILE, SETTINGS, STATS, THEME, CREDENTIALS];
}

/// String-keyed durable store
///
/// Implementations report failures as `AppError::Storage`.
pub trait BlobStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;

    /// Removing an absent key is not an error
    fn remove(&mut self, key: &str) -> AppResult<()>;

    /// Drop every stored key
    fn clear(&mut self) -> AppResult<()>;
}
