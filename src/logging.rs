//! Structured logging with console and rotating file output.
//!
//! Logs go to stdout (pretty, for interactive use) and to daily-rotated files
//! under the platform app data directory. Warnings and errors additionally
//! land in a separate `error.log` so failed batch entries are easy to find
//! after a long run.
//!
//! The filter defaults to `info` and honours `RUST_LOG`.

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter, Layer as _,
};

/// Log directory under the platform data dir:
///
/// - Windows: `%APPDATA%/gridsift/logs`
/// - macOS: `~/Library/Application Support/gridsift/logs`
/// - Linux: `~/.local/share/gridsift/logs`
pub fn log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = base_dir.join("gridsift").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Initialize the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a file appender
/// fails to build.
pub fn init() -> Result<()> {
    let log_dir = log_dir()?;

    let all_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("gridsift")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create all-logs file appender")?;

    let error_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("error")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create error-logs file appender")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_file(true)
        .pretty();

    let all_logs_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(all_logs_appender);

    let error_logs_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(error_logs_appender)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(all_logs_layer)
        .with(error_logs_layer)
        .init();

    tracing::info!("Logging initialized, log directory: {:?}", log_dir);
    if let Ok(path) = current_log_path() {
        tracing::debug!("Current log file: {}", path.display());
    }

    Ok(())
}

/// Path of today's main log file.
pub fn current_log_path() -> Result<PathBuf> {
    let log_dir = log_dir()?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    Ok(log_dir.join(format!("gridsift.{today}.log")))
}
