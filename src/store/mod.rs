//! Raw string key-value backends.
//!
//! DESIGN
//! ======
//! `KeyValueStore` is the seam between typed persistence and whatever holds
//! the bytes: the browser's `localStorage` (`hydrate` feature), a directory
//! of JSON files for native hosts, or a process-local map. Backends report
//! failures as `StoreError`; swallowing them is `LocalStore`'s job.

pub mod file;
pub mod memory;

#[cfg(feature = "hydrate")]
pub mod browser;

#[cfg(feature = "hydrate")]
pub use browser::BrowserStore;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors produced by a key-value backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing storage cannot be reached (no window, storage disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend refused a write, typically because its quota is full.
    #[error("storage quota exceeded for key {key}")]
    QuotaExceeded { key: String },

    /// Filesystem failure in a file-backed store.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// String-keyed, string-valued persistent storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be modified.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
