//! Configuration module for the chess coordinator.
//!
//! Configuration is a JSON document with every field defaulted, merged from
//! files, an inline JSON env var and per-field env overrides.
//!
//! # Module Structure
//!
//! - [`crate::config::types`]: Root `Config` struct
//! - [`server`]: coordinator behavior (seeding, re-entry tokens, admin events)
//! - [`storage`]: game directory persistence backend
//! - [`security`]: CORS and frame size limits
//! - [`logging`]: Logging configuration
//! - [`crate::config::loader`]: Configuration loading functions
//! - [`crate::config::validation`]: Configuration validation functions
//! - [`crate::config::defaults`]: Default value functions

pub mod defaults;
pub mod loader;
pub mod logging;
pub mod security;
pub mod server;
pub mod storage;
pub mod types;
pub mod validation;

pub use loader::load;

pub use logging::{LogFormat, LogLevel, LoggingConfig};

pub use security::SecurityConfig;

pub use server::ServerConfig;

pub use storage::{StorageBackend, StorageConfig};

pub use types::Config;

pub use validation::validate_config;
