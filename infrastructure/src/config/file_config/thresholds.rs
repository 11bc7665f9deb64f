//! Conclusion thresholds from TOML (`[thresholds]` section)
//!
//! ```toml
//! [thresholds]
//! power = 10      # minimum total voting power
//! majority = 75   # minimum majority share, percent
//! ```
//!
//! Neither field has a default. The environment variables
//! `VOTABLE_POWER_THRESHOLD` and `VOTABLE_MAJORITY_THRESHOLD` fill them too.

use super::{ConfigError, ConfigIssue};
use serde::{Deserialize, Serialize};
use stamp_domain::ConclusionPolicy;

/// Raw threshold configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileThresholdsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<u64>,
    /// Wider than `u8` so an out-of-range value is reported, not a parse error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub majority: Option<u64>,
}

impl FileThresholdsConfig {
    /// Build the conclusion policy, failing on missing or invalid fields
    pub fn to_policy(&self) -> Result<ConclusionPolicy, ConfigError> {
        let power = self.power.ok_or(ConfigError::Missing("thresholds.power"))?;
        let majority = self
            .majority
            .ok_or(ConfigError::Missing("thresholds.majority"))?;
        let majority = u8::try_from(majority)
            .ok()
            .filter(|m| *m <= 100)
            .ok_or_else(|| ConfigError::Invalid {
                field: "thresholds.majority",
                reason: format!("{} is not a percentage (0..=100)", majority),
            })?;
        Ok(ConclusionPolicy::new(power, majority))
    }

    pub(super) fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.power.is_none() {
            issues.push(ConfigIssue::error(
                "thresholds.power",
                "not set (VOTABLE_POWER_THRESHOLD)",
            ));
        }
        match self.majority {
            None => issues.push(ConfigIssue::error(
                "thresholds.majority",
                "not set (VOTABLE_MAJORITY_THRESHOLD)",
            )),
            Some(m) if m > 100 => issues.push(ConfigIssue::error(
                "thresholds.majority",
                format!("{} is not a percentage (0..=100)", m),
            )),
            Some(_) => {}
        }
        if self.power == Some(0) {
            issues.push(ConfigIssue::warning(
                "thresholds.power",
                "0 lets a subject with no votes pass the participation gate",
            ));
        }
        issues
    }
}
