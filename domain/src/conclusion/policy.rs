//! Conclusion policy
//!
//! Voting closes only when two independent gates pass on the same tally:
//!
//! - **participation**: total power ≥ `power_threshold`
//! - **agreement**: majority size ≥ `majority_threshold`
//!
//! A few high-reputation voters cannot close a vote on thin turnout, and a
//! large but evenly split turnout cannot close it at all.

use super::decision::Decision;
use crate::vote::{MajorityType, VoteTally};
use serde::{Deserialize, Serialize};

/// Thresholds for closing a vote
///
/// # Example
///
/// ```
/// use stamp_domain::{ConclusionPolicy, VoteTally};
///
/// let policy = ConclusionPolicy::new(10, 75);
/// assert!(policy.is_concludable(&VoteTally::from_powers(7.5, 2.5).unwrap()));  // 10, 75%
/// assert!(!policy.is_concludable(&VoteTally::from_powers(6.0, 3.0).unwrap())); // 9, 67%
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConclusionPolicy {
    /// Minimum total power, inclusive
    pub power_threshold: u64,
    /// Minimum majority percentage, inclusive
    pub majority_threshold: u8,
}

impl ConclusionPolicy {
    pub fn new(power_threshold: u64, majority_threshold: u8) -> Self {
        Self {
            power_threshold,
            majority_threshold,
        }
    }

    /// Evaluate both gates against already derived figures
    pub fn passes(&self, total_power: f64, majority_size: u8) -> bool {
        total_power >= self.power_threshold as f64 && majority_size >= self.majority_threshold
    }

    /// Whether the tally is decisive enough to close voting
    pub fn is_concludable(&self, tally: &VoteTally) -> bool {
        self.passes(tally.total_power(), tally.majority().size)
    }

    /// Pick the follow-up for a tally
    ///
    /// A tie that still passes both gates (only possible with a majority
    /// threshold of 50 or less) is sent to dispute.
    pub fn decide(&self, tally: &VoteTally) -> Decision {
        if !self.is_concludable(tally) {
            return Decision::Dispute;
        }
        match tally.majority().kind {
            MajorityType::Upvoters => Decision::Accept,
            MajorityType::Downvoters => Decision::Deny,
            MajorityType::Even => Decision::Dispute,
        }
    }

    pub fn description(&self) -> String {
        format!(
            "total power >= {} and majority >= {}%",
            self.power_threshold, self.majority_threshold
        )
    }
}

impl std::fmt::Display for ConclusionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ConclusionPolicy {
        ConclusionPolicy::new(10, 75)
    }

    #[test]
    fn test_power_below_threshold() {
        assert!(!policy().passes(9.0, 74));
        assert!(!policy().passes(9.0, 75));
        assert!(!policy().passes(9.0, 80));
    }

    #[test]
    fn test_power_equals_threshold() {
        assert!(!policy().passes(10.0, 74));
        assert!(policy().passes(10.0, 75));
        assert!(policy().passes(10.0, 80));
    }

    #[test]
    fn test_power_above_threshold() {
        assert!(!policy().passes(20.0, 74));
        assert!(policy().passes(20.0, 75));
        assert!(policy().passes(20.0, 80));
    }

    #[test]
    fn test_zero_votes_never_concludable() {
        let empty = VoteTally::default();
        assert!(!policy().is_concludable(&empty));
        // Even with a zero power gate the agreement gate rejects size 0
        assert!(!ConclusionPolicy::new(0, 1).is_concludable(&empty));
    }

    #[test]
    fn test_zero_thresholds_accept_empty_tally() {
        assert!(ConclusionPolicy::new(0, 0).is_concludable(&VoteTally::default()));
    }

    #[test]
    fn test_concludable_is_monotonic() {
        let policy = policy();
        for majority in 0..=100u8 {
            let mut seen = false;
            for power in 0..=40u32 {
                let now = policy.passes(power as f64, majority);
                assert!(!seen || now, "dropped at power {} majority {}", power, majority);
                seen = now;
            }
        }
        for power in 0..=40u32 {
            let mut seen = false;
            for majority in 0..=100u8 {
                let now = policy.passes(power as f64, majority);
                assert!(!seen || now, "dropped at power {} majority {}", power, majority);
                seen = now;
            }
        }
    }

    #[test]
    fn test_decide() {
        let policy = policy();
        let up = VoteTally::from_powers(18.0, 2.0).unwrap();
        let down = VoteTally::from_powers(1.0, 19.0).unwrap();
        let thin = VoteTally::from_powers(5.0, 0.0).unwrap();
        let split = VoteTally::from_powers(12.0, 8.0).unwrap();

        assert_eq!(policy.decide(&up), Decision::Accept);
        assert_eq!(policy.decide(&down), Decision::Deny);
        assert_eq!(policy.decide(&thin), Decision::Dispute);
        assert_eq!(policy.decide(&split), Decision::Dispute);
    }

    #[test]
    fn test_decide_even_with_low_majority_threshold() {
        let lenient = ConclusionPolicy::new(10, 50);
        let tie = VoteTally::from_powers(20.0, 20.0).unwrap();
        assert!(lenient.is_concludable(&tie));
        assert_eq!(lenient.decide(&tie), Decision::Dispute);
    }
}
