//! Key-value storage port - `localStorage` / `sessionStorage` in a browser.

use std::time::Duration;

/// Key-value store holding strings.
///
/// Browser storage is synchronous, so this port is too.
pub trait Storage: Send + Sync {
    /// Get a value, or `None` if absent or expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a value with optional time-to-live.
    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StorageError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
