//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod file;

pub use file::ConfigFile;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// External utility settings
    pub utility: UtilityConfig,
    /// Polling settings
    pub poll: PollConfig,
}

/// Settings for the liquidctl executable
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilityConfig {
    /// Path to the liquidctl executable
    pub path: String,
    /// Path to liquidctl's own configuration file, if any
    pub config_file: Option<String>,
    /// Command timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for UtilityConfig {
    fn default() -> Self {
        Self {
            path: "liquidctl".to_string(),
            config_file: None,
            timeout_seconds: 10,
        }
    }
}

impl UtilityConfig {
    /// Command timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// liquidctl config file path, if configured
    pub fn config_file_path(&self) -> Option<PathBuf> {
        self.config_file.as_ref().map(PathBuf::from)
    }
}

/// Settings for the watch polling loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Interval between polls in seconds
    pub interval_seconds: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_seconds: 2 }
    }
}

impl PollConfig {
    /// Poll interval as a Duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}
