//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use campus_admin::config::{Config, StorageBackend};
use campus_admin::storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
use parking_lot::Mutex;
use tempfile::TempDir;

/// Config using the in-memory backend and the given start path.
pub fn memory_config(initial_path: &str) -> Config {
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Memory;
    config.navigation.initial_path = initial_path.to_string();
    config
}

pub fn memory_storage() -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::new())
}

/// File storage inside a fresh temp dir. Keep the `TempDir` alive.
pub fn temp_file_storage() -> (TempDir, PathBuf, Arc<FileStorage>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("session.json");
    let storage = Arc::new(FileStorage::new(&path));
    (temp_dir, path, storage)
}

/// Write a config file with `content` into a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// In-memory storage whose writes to chosen keys start failing.
///
/// Reads always succeed. `set` and `remove` on an armed key succeed for
/// the remaining budget, then return `StorageError::WriteError`.
#[derive(Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    budgets: Mutex<HashMap<String, usize>>,
}

impl FlakyStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail every further write to `key`.
    pub fn fail_writes(&self, key: &str) {
        self.fail_after(key, 0);
    }

    /// Allow `allowed` more writes to `key`, then fail.
    pub fn fail_after(&self, key: &str, allowed: usize) {
        self.budgets.lock().insert(key.to_string(), allowed);
    }

    pub fn heal(&self) {
        self.budgets.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    fn check(&self, key: &str) -> Result<(), StorageError> {
        let mut budgets = self.budgets.lock();
        match budgets.get_mut(key) {
            Some(0) => Err(StorageError::WriteError {
                path: PathBuf::from("flaky"),
                source: std::io::Error::other(format!("write to '{key}' refused")),
            }),
            Some(remaining) => {
                *remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl KeyValueStorage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.remove(key)
    }
}
