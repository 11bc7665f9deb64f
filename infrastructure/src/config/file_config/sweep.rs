//! Conclusion sweep configuration from TOML (`[sweep]` section)

use super::{ConfigError, ConfigIssue};
use serde::{Deserialize, Serialize};
use stamp_application::EngineConfig;
use std::time::Duration;

/// Raw sweep configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSweepConfig {
    /// Hours a subject stays in progress before it is due for conclusion
    /// (`STAMP_CONCLUDE_IN_HOURS`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclude_in_hours: Option<u64>,
}

impl FileSweepConfig {
    /// Conclusion age, `None` when the sweep is not configured
    pub fn conclude_after(&self) -> Result<Option<Duration>, ConfigError> {
        let Some(hours) = self.conclude_in_hours else {
            return Ok(None);
        };
        EngineConfig::conclude_after_from_hours(hours)
            .map(Some)
            .ok_or_else(|| ConfigError::Invalid {
                field: "sweep.conclude_in_hours",
                reason: too_large(hours),
            })
    }

    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        match self.conclude_in_hours {
            Some(0) => vec![ConfigIssue::warning(
                "sweep.conclude_in_hours",
                "0 makes every in-progress stamp due immediately",
            )],
            Some(hours) if EngineConfig::conclude_after_from_hours(hours).is_none() => {
                vec![ConfigIssue::error("sweep.conclude_in_hours", too_large(hours))]
            }
            _ => Vec::new(),
        }
    }
}

fn too_large(hours: u64) -> String {
    format!("{} hours is too large to be a conclusion age", hours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Severity;

    #[test]
    fn test_conclude_after_hours() {
        let config = FileSweepConfig {
            conclude_in_hours: Some(3),
        };
        assert_eq!(
            config.conclude_after(),
            Ok(Some(Duration::from_secs(3 * 3600)))
        );
        assert!(config.issues().is_empty());
        assert_eq!(FileSweepConfig::default().conclude_after(), Ok(None));
    }

    #[test]
    fn test_overflowing_hours_are_invalid() {
        let config = FileSweepConfig {
            conclude_in_hours: Some(u64::MAX),
        };
        assert!(matches!(
            config.conclude_after(),
            Err(ConfigError::Invalid {
                field: "sweep.conclude_in_hours",
                ..
            })
        ));
        let issues = config.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
    }
}
