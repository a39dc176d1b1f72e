//! In-memory key-value storage.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use brew_core::ports::{Storage, StorageError};

struct StorageEntry {
    value: String,
    expires_at: Option<Instant>,
}

/// In-memory storage using a HashMap behind a RwLock.
///
/// Data is lost when the process exits, like a tab's `sessionStorage`.
pub struct InMemoryStorage {
    store: RwLock<HashMap<String, StorageEntry>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn is_expired(entry: &StorageEntry) -> bool {
        entry
            .expires_at
            .map(|exp| Instant::now() > exp)
            .unwrap_or(false)
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        {
            let store = self.store.read().unwrap_or_else(|e| e.into_inner());
            let entry = store.get(key)?;
            if !Self::is_expired(entry) {
                return Some(entry.value.clone());
            }
        }

        // Expired: drop it under the write lock
        let mut store = self.store.write().unwrap_or_else(|e| e.into_inner());
        store.remove(key);
        None
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StorageError> {
        let mut store = self.store.write().unwrap_or_else(|e| e.into_inner());

        store.insert(
            key.to_string(),
            StorageEntry {
                value: value.to_string(),
                expires_at: ttl.map(|d| Instant::now() + d),
            },
        );

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut store = self.store.write().unwrap_or_else(|e| e.into_inner());
        store.remove(key);
        Ok(())
    }
}
