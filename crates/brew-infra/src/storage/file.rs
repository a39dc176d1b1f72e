//! JSON-file key-value storage.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use brew_core::ports::{Storage, StorageError};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FileEntry {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

/// Storage persisted as one JSON object on disk.
///
/// The whole map is rewritten on every change; it holds a token and a
/// cached user, nothing large.
pub struct JsonFileStorage {
    path: PathBuf,
    store: RwLock<HashMap<String, FileEntry>>,
}

impl JsonFileStorage {
    /// Open (or start) the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let store = match fs::read_to_string(&path) {
            Ok(contents) if !contents.trim().is_empty() => serde_json::from_str(&contents)
                .map_err(|e| StorageError::Serialization(e.to_string()))?,
            Ok(_) => HashMap::new(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        tracing::debug!(path = %path.display(), entries = store.len(), "Opened storage file");

        Ok(Self {
            path,
            store: RwLock::new(store),
        })
    }

    fn flush(&self, store: &HashMap<String, FileEntry>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(store)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| StorageError::Io(e.to_string()))
    }

    fn is_expired(entry: &FileEntry) -> bool {
        entry.expires_at.map(|exp| Utc::now() > exp).unwrap_or(false)
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().unwrap_or_else(|e| e.into_inner());
        store
            .get(key)
            .filter(|entry| !Self::is_expired(entry))
            .map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StorageError> {
        let mut store = self.store.write().unwrap_or_else(|e| e.into_inner());

        let expires_at = ttl
            .and_then(|d| TimeDelta::from_std(d).ok())
            .map(|d| Utc::now() + d);

        store.insert(
            key.to_string(),
            FileEntry {
                value: value.to_string(),
                expires_at,
            },
        );
        self.flush(&store)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut store = self.store.write().unwrap_or_else(|e| e.into_inner());
        if store.remove(key).is_some() {
            self.flush(&store)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("brew-infra-{}-{}", name, std::process::id()))
            .join("storage.json")
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let storage = JsonFileStorage::open(&path).unwrap();
        storage.set("auth_token", "abc", None).unwrap();
        drop(storage);

        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("auth_token"), Some("abc".to_string()));

        reopened.remove("auth_token").unwrap();
        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("auth_token"), None);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        let storage = JsonFileStorage::open(&path).unwrap();
        assert_eq!(storage.get("anything"), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonFileStorage::open(&path),
            Err(StorageError::Serialization(_))
        ));
        let _ = fs::remove_file(&path);
    }
}
