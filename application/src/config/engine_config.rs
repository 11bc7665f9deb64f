//! Engine configuration.
//!
//! [`EngineConfig`] carries the conclusion thresholds and the runtime knobs of
//! the use cases. The thresholds have no defaults: an engine can only be
//! built once they have been supplied, so a missing threshold stops startup
//! instead of surfacing at the first vote.

use chrono::{DateTime, Utc};
use stamp_domain::ConclusionPolicy;
use std::time::Duration;

/// Static engine parameters
///
/// | Field | Used by |
/// |-------|---------|
/// | `policy` | evaluation, conclusion |
/// | `conclude_after` | sweep |
/// | `collaborator_timeout` | every port call |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Conclusion thresholds
    pub policy: ConclusionPolicy,
    /// Age at which an in-progress subject is due for a conclusion check
    pub conclude_after: Option<Duration>,
    /// Upper bound on a single collaborator call
    pub collaborator_timeout: Option<Duration>,
}

impl EngineConfig {
    pub fn new(policy: ConclusionPolicy) -> Self {
        Self {
            policy,
            conclude_after: None,
            collaborator_timeout: None,
        }
    }

    // ==================== Builder Methods ====================

    /// Saturates when `hours` has no representable age; nothing is then
    /// ever due
    pub fn with_conclude_after_hours(mut self, hours: u64) -> Self {
        let age = Self::conclude_after_from_hours(hours).unwrap_or(Duration::MAX);
        self.conclude_after = Some(age);
        self
    }

    pub fn with_collaborator_timeout(mut self, timeout: Duration) -> Self {
        self.collaborator_timeout = Some(timeout);
        self
    }

    /// Conclusion age for `hours`, `None` if it cannot be represented
    pub fn conclude_after_from_hours(hours: u64) -> Option<Duration> {
        let age = Duration::from_secs(hours.checked_mul(3600)?);
        chrono::Duration::from_std(age).ok()?;
        Some(age)
    }

    /// Creation time before which in-progress subjects are due at `now`
    ///
    /// `None` when no conclusion age is configured. An age reaching past the
    /// earliest representable instant makes nothing due.
    pub fn sweep_cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let age = self.conclude_after?;
        Some(
            chrono::Duration::from_std(age)
                .ok()
                .and_then(|age| now.checked_sub_signed(age))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        )
    }
}
