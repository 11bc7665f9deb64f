//! Engine runtime configuration from TOML (`[engine]` section)

use super::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Raw engine configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Upper bound on a single collaborator call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborator_timeout_secs: Option<u64>,
    /// Append every recorded activity to this JSONL file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_log: Option<PathBuf>,
}

impl FileEngineConfig {
    pub fn collaborator_timeout(&self) -> Option<Duration> {
        self.collaborator_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        match self.collaborator_timeout_secs {
            Some(0) => vec![ConfigIssue::warning(
                "engine.collaborator_timeout_secs",
                "0 disables the collaborator timeout",
            )],
            _ => Vec::new(),
        }
    }
}
