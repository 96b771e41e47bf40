//! Default value functions for configuration fields.
//!
//! Used by `#[serde(default = ...)]` attributes throughout the configuration
//! types so that partially specified documents fill in the same values as
//! `Config::default()`.

use super::logging::LogFormat;
use super::storage::StorageBackend;

// =============================================================================
// Port & Root Config
// =============================================================================

pub const fn default_port() -> u16 {
    3000
}

// =============================================================================
// Server Defaults
// =============================================================================

pub const fn default_seed_test_game() -> bool {
    true
}

pub const fn default_require_reentry_token() -> bool {
    false
}

pub const fn default_enable_admin_events() -> bool {
    true
}

pub const fn default_channel_capacity() -> usize {
    64
}

// =============================================================================
// Storage Defaults
// =============================================================================

pub const fn default_storage_backend() -> StorageBackend {
    StorageBackend::JsonFile
}

pub fn default_storage_path() -> String {
    "games.json".to_string()
}

// =============================================================================
// Logging Defaults
// =============================================================================

pub fn default_log_dir() -> String {
    "logs".to_string()
}

pub fn default_log_filename() -> String {
    "coordinator.log".to_string()
}

pub fn default_rotation() -> String {
    "daily".to_string()
}

pub const fn default_enable_file_logging() -> bool {
    false
}

pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

// =============================================================================
// Security Defaults
// =============================================================================

pub fn default_cors_origins() -> String {
    "*".to_string()
}

pub const fn default_max_message_size() -> usize {
    65536 // 64KB
}
