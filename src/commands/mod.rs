//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod list;
pub mod set;
pub mod status;
pub mod watch;

pub use list::run_list;
pub use set::run_set;
pub use status::run_status;
pub use watch::run_watch;

use crate::config::{Config, ConfigFile};
use crate::error::Result;
use crate::liquidctl::CliExecutor;

/// Resolve configuration: explicit file, then default locations, then defaults
pub fn resolve_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => Ok(ConfigFile::load(path)?),
        None => Ok(ConfigFile::load_default().unwrap_or_default()),
    }
}

/// Build the subprocess executor from config plus CLI overrides
pub fn build_executor(config: &Config, exe_override: Option<&str>) -> CliExecutor {
    let exe = exe_override.unwrap_or(&config.utility.path);
    CliExecutor::new(
        exe,
        config.utility.config_file_path(),
        config.utility.timeout(),
    )
}
