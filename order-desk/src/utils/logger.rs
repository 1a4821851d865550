//! Logging Infrastructure
//!
//! Structured logging setup for the terminal front end. Library code only
//! emits `tracing` events; installing a subscriber is left to binaries.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` takes precedence over `log_level`. When `log_dir` exists,
/// output goes to a daily rolling file instead of the terminal.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "order-desk");
            // A subscriber may already be installed
            let _ = subscriber
                .with_writer(file_appender)
                .with_ansi(false)
                .try_init();
            return;
        }
        eprintln!("Log directory {} does not exist, logging to terminal", dir);
    }

    let _ = subscriber.try_init();
}
