//! Game directory persistence configuration.

use super::defaults::{default_storage_backend, default_storage_path};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the game directory snapshot is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Single JSON document on local disk, rewritten after every mutation.
    #[default]
    JsonFile,
    /// Process memory only; games are lost on restart.
    Memory,
}

impl StorageBackend {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JsonFile => "json_file",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: StorageBackend,
    /// Path of the JSON document (json_file backend only)
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            path: default_storage_path(),
        }
    }
}
