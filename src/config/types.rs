use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which durable storage backend holds the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file on disk.
    #[default]
    File,
    /// In-process map, discarded on exit.
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Session file location for the file backend.
    /// Defaults to `<data_dir>/campus-admin/session.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_storage_path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Path the router starts on (default: "/").
    #[serde(default = "default_initial_path")]
    pub initial_path: String,
    /// Refuse protected routes without a session (default: false).
    #[serde(default)]
    pub enforce_auth: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `CAMPUS_ADMIN_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            initial_path: default_initial_path(),
            enforce_auth: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("campus-admin")
        .join("session.json")
}

fn default_initial_path() -> String {
    "/".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}
