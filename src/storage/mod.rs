//! Durable key-value storage behind the session store.
//!
//! Values are strings keyed by strings. Backends are swappable so the
//! session store runs against a file on disk or an in-memory map.

mod file;
mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{StorageBackend, StorageConfig};

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read storage file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write storage file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock storage file '{path}': {source}")]
    LockError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage file '{path}' is not a JSON object of strings: {source}")]
    CorruptError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String-valued key-value store.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Open the backend selected in configuration.
pub fn open(config: &StorageConfig) -> Arc<dyn KeyValueStorage> {
    match config.backend {
        StorageBackend::File => Arc::new(FileStorage::new(config.resolved_path())),
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
    }
}
