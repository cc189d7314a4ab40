//! Logging Infrastructure
//!
//! Console output plus an append-only `printer_client.log` file.
//! Every line carries a local timestamp and level.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log file name inside the log directory
pub const LOG_FILE_NAME: &str = "printer_client.log";

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
        )
    }
}

/// Full path of the log file for a log directory
pub fn log_file_path(log_dir: &str) -> PathBuf {
    Path::new(log_dir).join(LOG_FILE_NAME)
}

/// Create the log directory and an appender that never rotates
///
/// Existing content is kept; new lines are appended. Fails instead of
/// panicking when the file cannot be opened.
pub fn open_log_file(log_dir: &str) -> anyhow::Result<RollingFileAppender> {
    fs::create_dir_all(log_dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)?;
    Ok(appender)
}

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `level`. The returned guard flushes the
/// file writer on drop and must be held for the life of the process.
pub fn init_logger(level: &str, log_dir: &str) -> anyhow::Result<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = open_log_file(log_dir)?;
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_writer(non_blocking_file);

    let stdout_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_ansi(true)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    tracing::info!(path = %log_file_path(log_dir).display(), "Tracing initialized");

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_file_path() {
        assert_eq!(
            log_file_path("/var/log/comanda"),
            PathBuf::from("/var/log/comanda/printer_client.log")
        );
    }

    #[test]
    fn test_open_log_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs");
        let nested = nested.to_str().unwrap();

        let mut first = open_log_file(nested).unwrap();
        first.write_all(b"first\n").unwrap();
        first.flush().unwrap();
        drop(first);

        let mut second = open_log_file(nested).unwrap();
        second.write_all(b"second\n").unwrap();
        second.flush().unwrap();
        drop(second);

        let content = fs::read_to_string(log_file_path(nested)).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_reports_unopenable_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().to_str().unwrap();
        // a directory where the log file should be
        fs::create_dir(log_file_path(log_dir)).unwrap();

        assert!(open_log_file(log_dir).is_err());
    }
}
