use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error for key {key}: {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String-keyed JSON blob store. The whole application state lives behind
/// this trait; cells receive a store handle instead of reaching for a global.
pub trait KeyValueStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get_raw(key)?.is_some())
    }
}

/// Read a typed value, falling back when the key is absent or the stored
/// JSON is corrupt. Matches the forgiving read semantics of the original
/// key-value layer: domain code never sees a decode failure.
pub fn read_or<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    fallback: T,
) -> Result<T, StorageError> {
    match store.get_raw(key)? {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!("Discarding corrupt value under key {}: {}", key, e);
                Ok(fallback)
            }
        },
        None => Ok(fallback),
    }
}

pub fn read_or_default<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<T, StorageError> {
    read_or(store, key, T::default())
}

pub fn write<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serde {
        key: key.to_string(),
        source,
    })?;
    store.put_raw(key, &raw)
}

// ==============================================================================
// IN-MEMORY BACKEND
// ==============================================================================

/// Volatile backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

// ==============================================================================
// JSON-FILE BACKEND
// ==============================================================================

/// Durable backend keeping one `<key>.json` file per key under a data
/// directory. Last write wins; there are no transactional guarantees.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        debug!("Opened JSON file store at {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        write(&store, "numbers", &vec![1, 2, 3]).unwrap();
        let back: Vec<i32> = read_or(&store, "numbers", vec![]).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_key_yields_fallback() {
        let store = MemoryStore::new();
        let value: Vec<String> = read_or(&store, "absent", vec!["x".to_string()]).unwrap();
        assert_eq!(value, vec!["x".to_string()]);
    }

    #[test]
    fn test_corrupt_value_yields_fallback() {
        let store = MemoryStore::new();
        store.put_raw("bad", "{not json").unwrap();
        let value: Vec<i32> = read_or(&store, "bad", vec![7]).unwrap();
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn test_remove_then_contains() {
        let store = MemoryStore::new();
        store.put_raw("k", "1").unwrap();
        assert!(store.contains("k").unwrap());
        store.remove("k").unwrap();
        assert!(!store.contains("k").unwrap());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonFileStore::open(dir.path()).unwrap();
            write(&store, "patients", &vec!["a", "b"]).unwrap();
        }
        let store = JsonFileStore::open(dir.path()).unwrap();
        let back: Vec<String> = read_or(&store, "patients", vec![]).unwrap();
        assert_eq!(back, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_file_store_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        store.remove("never_written").unwrap();
    }
}
