use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log file settings. Output only goes to file; the terminal belongs to the deck view.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_enabled")]
    pub enabled: bool,
    /// error, warn, info, debug or trace
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
    /// Overrides the platform log directory
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Keep the previous session's log instead of truncating it
    #[serde(default)]
    pub append: bool,
    #[serde(default = "LoggingConfig::default_rotation_size_mb")]
    pub rotation_size_mb: u64,
    /// Rotated files to keep; 0 disables rotation
    #[serde(default = "LoggingConfig::default_keep_files")]
    pub keep_files: usize,
}

impl LoggingConfig {
    fn default_enabled() -> bool {
        true
    }

    fn default_level() -> String {
        "info".to_string()
    }

    fn default_rotation_size_mb() -> u64 {
        5
    }

    fn default_keep_files() -> usize {
        3
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            level: Self::default_level(),
            directory: None,
            append: false,
            rotation_size_mb: Self::default_rotation_size_mb(),
            keep_files: Self::default_keep_files(),
        }
    }
}
