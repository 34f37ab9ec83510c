//! Durable key/value storage.
//!
//! Values are whole JSON documents; writers always replace the full value
//! under a key, there is no partial update.

use crate::error::StorageError;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// A string-keyed store of serialized values
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`, `None` when nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on the first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        debug!("Writing {} bytes to {}", value.len(), path.display());
        fs::write(path, value)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same underlying map, so a fresh
/// handle sees everything written through any other handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("forkify-store-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_file_store_missing_key() {
        let store = FileStore::new(temp_dir());
        assert!(store.get("likes").unwrap().is_none());
    }

    #[test]
    fn test_file_store_set_then_overwrite() {
        let dir = temp_dir();
        let mut store = FileStore::new(&dir);
        assert_eq!(store.dir(), dir.as_path());

        store.set("likes", "[]").unwrap();
        assert_eq!(store.get("likes").unwrap().as_deref(), Some("[]"));
        assert!(dir.join("likes.json").exists());

        store.set("likes", "[1]").unwrap();
        assert_eq!(store.get("likes").unwrap().as_deref(), Some("[1]"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_memory_store_clones_share_values() {
        let mut store = MemoryStore::new();
        let other = store.clone();

        store.set("likes", "[]").unwrap();
        assert_eq!(other.get("likes").unwrap().as_deref(), Some("[]"));
    }
}
