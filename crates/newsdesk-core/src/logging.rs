//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Result, ResultExt};

/// Environment variable holding the log filter
pub const LOG_ENV_VAR: &str = "NEWSDESK_LOG";

const LOG_FILE_NAME: &str = "newsdesk.log";
const DEFAULT_FILTER: &str = "newsdesk=info,warn";

/// Initialize the logging subsystem
///
/// Logs go to a daily rolling file under the local data directory, never to
/// the terminal. The level is controlled by `NEWSDESK_LOG`.
///
/// # Examples
/// ```bash
/// NEWSDESK_LOG=debug newsdesk
/// NEWSDESK_LOG=newsdesk_api=trace newsdesk
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("Newsdesk starting, logging to {}", log_dir.display());
    Ok(())
}

/// Filter from `NEWSDESK_LOG`, or the default when unset or invalid.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Directory holding the rolling log files
pub fn log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("newsdesk").join("logs")
}

/// Base path of the log file (the appender adds a date suffix)
pub fn current_log_file() -> PathBuf {
    log_directory().join(LOG_FILE_NAME)
}
