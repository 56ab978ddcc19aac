use crate::persistence::ensure_dir;
use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "tally.log";

/// Guard that must be kept alive to ensure logs are flushed
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Build the filter, falling back to the default directive when `filter` does not parse
pub fn build_filter(filter: &str) -> EnvFilter {
    EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_FILTER))
}

/// Initialize daily-rolling file logging under `log_dir`.
/// The terminal belongs to the UI, so nothing is written to stdout/stderr.
pub fn init_logging(log_dir: &Path, filter: &str) -> Result<LoggingGuard> {
    ensure_dir(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry().with(build_filter(filter)).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true),
    );

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global tracing subscriber")?;

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");

    Ok(LoggingGuard { _guard: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_accepts_directives() {
        assert_eq!(build_filter("debug").to_string(), "debug");
        assert_eq!(build_filter("tally=trace").to_string(), "tally=trace");
    }

    #[test]
    fn test_build_filter_falls_back_on_garbage() {
        assert_eq!(build_filter("tally=notalevel").to_string(), "info");
    }
}
