//! JSON-file storage backend.
//!
//! The whole store is one JSON object of string values. Every mutation
//! is a read-modify-write under an exclusive lock on a sidecar lock file,
//! and the new contents replace the old through a rename.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use super::{KeyValueStorage, StorageError};

type Entries = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StorageError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content).map_err(|e| StorageError::CorruptError {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        let write_err = |e| StorageError::WriteError {
            path: self.path.clone(),
            source: e,
        };

        let content = serde_json::to_string_pretty(entries).map_err(|e| {
            StorageError::CorruptError {
                path: self.path.clone(),
                source: e,
            }
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).map_err(write_err)?;
        fs::rename(&tmp_path, &self.path).map_err(write_err)
    }

    fn lock(&self) -> Result<File, StorageError> {
        let lock_err = |e| StorageError::LockError {
            path: self.path.clone(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(lock_err)?;
            }
        }

        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.path.with_extension("lock"))
            .map_err(lock_err)?;
        lock.lock_exclusive().map_err(lock_err)?;
        Ok(lock)
    }

    /// Read-modify-write. The lock is released when `_lock` drops.
    fn update(&self, apply: impl FnOnce(&mut Entries)) -> Result<(), StorageError> {
        let _lock = self.lock()?;
        let mut entries = self.read_entries()?;
        apply(&mut entries);
        self.write_entries(&entries)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!(key, path = %self.path.display(), "storage set");
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        debug!(key, path = %self.path.display(), "storage remove");
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
