use crate::persistence::default_data_dir;
use anyhow::Result;
use std::path::PathBuf;

/// Default tracing filter when none is given
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime configuration, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory backing the key-value store
    pub data_dir: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Config {
    /// Resolve from optional overrides (command line or environment).
    /// Without a directory override the nearest local .tally wins, then ~/.tally.
    pub fn resolve(dir: Option<PathBuf>, log_filter: Option<String>) -> Result<Self> {
        let data_dir = match dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        let log_filter = log_filter
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            data_dir,
            log_filter,
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
