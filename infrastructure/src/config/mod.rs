//! Configuration file loading for stamp-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `VOTABLE_POWER_THRESHOLD`, `VOTABLE_MAJORITY_THRESHOLD`,
//!    `STAMP_CONCLUDE_IN_HOURS`
//! 2. `--config <path>` specified file
//! 3. Project root: `./stamp-quorum.toml` or `./.stamp-quorum.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/stamp-quorum/config.toml`
//! 5. Default values (thresholds have none)

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, ConfigIssue, FileConfig, FileEngineConfig, FileSweepConfig,
    FileThresholdsConfig, Severity,
};
pub use loader::ConfigLoader;
