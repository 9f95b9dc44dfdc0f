//! Logging Infrastructure
//!
//! Console logging by default; with a log directory, output goes to a
//! daily-rolling file instead (`sales-report.YYYY-MM-DD`).

use std::path::Path;

/// Initialize the logger with optional file output
///
/// A missing log directory is created; if that fails, logs stay on the
/// console. Safe to call more than once (later calls are no-ops).
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, "sales-report");
            let _ = subscriber.with_writer(file_appender).with_ansi(false).try_init();
            return;
        }
        eprintln!("Cannot create log directory {}, logging to console", dir);
    }

    // Stats output goes to stdout; keep logs off it
    let _ = subscriber.with_writer(std::io::stderr).try_init();
}
