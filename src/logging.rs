//! Logging setup.
//!
//! Records go to stderr and to daily-rotated files in the platform data
//! directory. If that directory cannot be created the plotter still starts
//! with console logging only.
//!
//! ```no_run
//! csv_plotter::logging::init();
//! tracing::info!("App started");
//! ```

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

const APP_DIR: &str = "csv_plotter";
const LOG_PREFIX: &str = "csv_plotter";
const ERROR_PREFIX: &str = "error";
const KEEP_LOG_FILES: usize = 10;

/// `<data_dir>/csv_plotter/logs`, created if missing.
///
/// - Windows: `%APPDATA%/csv_plotter/logs`
/// - macOS: `~/Library/Application Support/csv_plotter/logs`
/// - Linux: `~/.local/share/csv_plotter/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = base_dir.join(APP_DIR).join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }
    Ok(log_dir)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Call once, at startup.
///
/// Falls back to console-only output when the log files cannot be set up;
/// the reason is logged once the console layer is live.
pub fn init() {
    match file_appenders() {
        Ok((dir, all, errors)) => {
            let console = fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_writer(std::io::stderr)
                .pretty();
            let all_layer = fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .with_ansi(false)
                .with_writer(all);
            let error_layer = fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .with_ansi(false)
                .with_writer(errors)
                .with_filter(EnvFilter::new("warn"));

            tracing_subscriber::registry()
                .with(env_filter())
                .with(console)
                .with(all_layer)
                .with(error_layer)
                .init();
            tracing::info!(
                log_file = %current_log_path(&dir).display(),
                "Logging initialized"
            );
        }
        Err(err) => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt::layer().with_writer(std::io::stderr).pretty())
                .init();
            tracing::warn!("File logging disabled: {err:#}");
        }
    }
}

fn file_appenders() -> Result<(PathBuf, RollingFileAppender, RollingFileAppender)> {
    let log_dir = get_log_dir()?;

    let all = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(KEEP_LOG_FILES)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create log file appender")?;

    let errors = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(KEEP_LOG_FILES)
        .filename_prefix(ERROR_PREFIX)
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create error log file appender")?;

    Ok((log_dir, all, errors))
}

/// Today's main log file inside `log_dir`.
pub fn current_log_path(log_dir: &Path) -> PathBuf {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    log_dir.join(format!("{LOG_PREFIX}.{today}.log"))
}
