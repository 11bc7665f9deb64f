//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the application's
//! [`EngineConfig`] once every source has been merged.

mod engine;
mod sweep;
mod thresholds;

pub use engine::FileEngineConfig;
pub use sweep::FileSweepConfig;
pub use thresholds::FileThresholdsConfig;

use serde::{Deserialize, Serialize};
use stamp_application::EngineConfig;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(&'static str),

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Could not load configuration: {0}")]
    Load(String),
}

/// Severity level of a configuration issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The engine cannot start with this configuration
    Error,
    Warning,
}

/// A detected issue in the merged configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub field: &'static str,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field,
            message: message.into(),
        }
    }

    pub fn warning(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field,
            message: message.into(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Conclusion thresholds
    pub thresholds: FileThresholdsConfig,
    /// Conclusion sweep
    pub sweep: FileSweepConfig,
    /// Engine runtime settings
    pub engine: FileEngineConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.thresholds.issues();
        issues.extend(self.sweep.issues());
        issues.extend(self.engine.issues());
        issues
    }

    /// Convert into the engine's configuration
    ///
    /// Fails when a threshold is missing or a value is out of range.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let mut config = EngineConfig::new(self.thresholds.to_policy()?);
        config.conclude_after = self.sweep.conclude_after()?;
        if let Some(timeout) = self.engine.collaborator_timeout() {
            config = config.with_collaborator_timeout(timeout);
        }
        Ok(config)
    }
}
