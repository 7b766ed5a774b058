//! Tracing subscriber setup for the tracker binaries.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform-specific log directory:
/// - Linux: `~/.cache/encounter-tracker/logs` (or `$XDG_CACHE_HOME/...`)
/// - macOS: `~/Library/Caches/encounter-tracker/logs`
/// - Windows: `%LOCALAPPDATA%\encounter-tracker\logs`
/// - Fallback: `/tmp/encounter-tracker/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "encounter-tracker")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/encounter-tracker"))
        .join("logs")
}

/// Installs stderr and file logging filtered by `RUST_LOG` (default `info`).
///
/// Keep the returned guard alive for the lifetime of the process, or
/// buffered file output is lost.
pub fn setup_logging(file_name: &str) -> Result<WorkerGuard> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(dir = %log_dir.display(), file = file_name, "logging initialised");
    Ok(guard)
}
