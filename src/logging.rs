use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt::time::UtcTime, layer::Identity, prelude::*, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber: stdout plus an optional rolling file.
///
/// The filter comes from `logging.level` when set, then `RUST_LOG`, then
/// `info`. The returned guard flushes the file writer on drop and must live
/// as long as the process logs.
pub fn init_with_config(cfg: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter = build_env_filter(cfg);

    match cfg.format {
        LogFormat::Json => init_json_logging(cfg, env_filter),
        LogFormat::Text => init_text_logging(cfg, env_filter),
    }
}

fn build_env_filter(cfg: &LoggingConfig) -> EnvFilter {
    match &cfg.level {
        Some(level) => EnvFilter::new(level.as_str()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

fn init_json_logging(cfg: &LoggingConfig, env_filter: EnvFilter) -> Option<WorkerGuard> {
    let registry = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(std::io::stdout),
    );

    if let Some((writer, guard)) = file_writer(cfg) {
        let file_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(writer);
        let _ = registry.with(file_layer).try_init();
        return Some(guard);
    }

    let _ = registry.with(Identity::new()).try_init();
    None
}

fn init_text_logging(cfg: &LoggingConfig, env_filter: EnvFilter) -> Option<WorkerGuard> {
    let registry = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(std::io::stdout),
    );

    if let Some((writer, guard)) = file_writer(cfg) {
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_timer(UtcTime::rfc_3339())
            .with_writer(writer);
        let _ = registry.with(file_layer).try_init();
        return Some(guard);
    }

    let _ = registry.with(Identity::new()).try_init();
    None
}

fn rotation_for(policy: &str) -> Rotation {
    match policy.to_ascii_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

fn file_writer(cfg: &LoggingConfig) -> Option<(NonBlocking, WorkerGuard)> {
    if !cfg.enable_file_logging {
        return None;
    }

    if let Err(err) = std::fs::create_dir_all(&cfg.dir) {
        eprintln!(
            "Failed to create log directory '{}' ({err}), continuing with stdout logs",
            cfg.dir
        );
        return None;
    }

    let appender = RollingFileAppender::new(rotation_for(&cfg.rotation), &cfg.dir, &cfg.filename);
    Some(tracing_appender::non_blocking(appender))
}
