//! Configuration validation.

use super::storage::StorageBackend;
use super::Config;

/// Reject configurations the coordinator cannot run with.
pub fn validate_config(config: &Config) -> anyhow::Result<()> {
    if config.server.channel_capacity == 0 {
        anyhow::bail!("server.channel_capacity must be greater than zero");
    }

    if config.security.max_message_size == 0 {
        anyhow::bail!("security.max_message_size must be greater than zero");
    }

    if config.storage.backend == StorageBackend::JsonFile && config.storage.path.trim().is_empty()
    {
        anyhow::bail!(
            "storage.path must be set when storage.backend is \"{}\"",
            StorageBackend::JsonFile
        );
    }

    if !matches!(config.logging.rotation.as_str(), "daily" | "hourly" | "never") {
        eprintln!(
            "WARNING: unknown logging.rotation '{}', falling back to daily",
            config.logging.rotation
        );
    }

    Ok(())
}
