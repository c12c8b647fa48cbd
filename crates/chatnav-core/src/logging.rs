//! File logging.
//!
//! The TUI owns the terminal, so log records go to a daily-rotated file under
//! `$CHATNAV_HOME/logs` instead of stderr.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the filter directives (e.g. `chatnav_tui=debug`).
pub const LOG_ENV: &str = "CHATNAV_LOG";

const DEFAULT_DIRECTIVE: &str = "info";
const LOG_FILE_PREFIX: &str = "chatnav.log";

/// Filter from `CHATNAV_LOG`, falling back to `info` when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber writing to `logs_dir`.
///
/// The returned guard flushes buffered records when dropped; hold it until
/// the program exits.
pub fn init(logs_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::debug!(dir = %logs_dir.display(), "logging initialized");
    Ok(guard)
}
