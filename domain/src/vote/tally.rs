//! Weighted vote tally
//!
//! A [`VoteTally`] is a snapshot of the power behind each polarity. Majority
//! figures and the conclusion decision are always derived from one snapshot
//! so they cannot disagree with each other.

use super::entities::{Polarity, Vote, VotingPower};
use super::majority::Majority;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Aggregated power of the votes cast on one subject
///
/// # Example
///
/// ```
/// use stamp_domain::{SubjectId, UserId, Vote, VoteTally};
///
/// let votes = vec![
///     Vote::up(UserId(1), SubjectId(1), 140.0),
///     Vote::down(UserId(2), SubjectId(1), 60.0),
/// ];
/// let tally = VoteTally::from_votes(&votes).unwrap();
/// assert_eq!(tally.total_power(), 200.0);
/// assert_eq!(tally.majority().size, 70);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub upvote_power: f64,
    pub downvote_power: f64,
    pub vote_count: usize,
}

impl VoteTally {
    /// Sum the power of each polarity
    ///
    /// Rejects the whole snapshot if any vote carries a negative or
    /// non-finite power; such data is never clamped.
    pub fn from_votes(votes: &[Vote]) -> Result<Self, DomainError> {
        let mut tally = Self::default();
        for vote in votes {
            if !vote.power.is_valid() {
                return Err(DomainError::InconsistentTally(format!(
                    "vote by user {} on stamp {} has power {}",
                    vote.caster,
                    vote.subject,
                    vote.power.value()
                )));
            }
            match vote.polarity {
                Polarity::Up => tally.upvote_power += vote.power.value(),
                Polarity::Down => tally.downvote_power += vote.power.value(),
            }
            tally.vote_count += 1;
        }
        tally.ensure_finite()
    }

    /// Build a tally from already aggregated powers
    pub fn from_powers(upvote_power: f64, downvote_power: f64) -> Result<Self, DomainError> {
        for (label, power) in [("upvote", upvote_power), ("downvote", downvote_power)] {
            if !VotingPower(power).is_valid() {
                return Err(DomainError::InconsistentTally(format!(
                    "{} power is {}",
                    label, power
                )));
            }
        }
        Self {
            upvote_power,
            downvote_power,
            vote_count: 0,
        }
        .ensure_finite()
    }

    /// Sums of valid powers can still overflow to infinity
    fn ensure_finite(self) -> Result<Self, DomainError> {
        if self.upvote_power.is_finite()
            && self.downvote_power.is_finite()
            && self.total_power().is_finite()
        {
            Ok(self)
        } else {
            Err(DomainError::InconsistentTally(format!(
                "power overflows (up {}, down {})",
                self.upvote_power, self.downvote_power
            )))
        }
    }

    pub fn total_power(&self) -> f64 {
        self.upvote_power + self.downvote_power
    }

    pub fn is_empty(&self) -> bool {
        self.total_power() == 0.0
    }

    /// Majority figures for this snapshot
    pub fn majority(&self) -> Majority {
        Majority::from_powers(self.upvote_power, self.downvote_power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::{SubjectId, UserId};

    fn vote(caster: i64, polarity: Polarity, power: f64) -> Vote {
        Vote::new(UserId(caster), SubjectId(1), polarity, power)
    }

    #[test]
    fn test_empty_tally() {
        let tally = VoteTally::from_votes(&[]).unwrap();
        assert_eq!(tally.upvote_power, 0.0);
        assert_eq!(tally.downvote_power, 0.0);
        assert_eq!(tally.total_power(), 0.0);
        assert!(tally.is_empty());
    }

    #[test]
    fn test_tally_sums_by_polarity() {
        let votes = vec![
            vote(1, Polarity::Up, 100.0),
            vote(2, Polarity::Down, 60.0),
            vote(3, Polarity::Up, 40.0),
        ];
        let tally = VoteTally::from_votes(&votes).unwrap();
        assert_eq!(tally.upvote_power, 140.0);
        assert_eq!(tally.downvote_power, 60.0);
        assert_eq!(tally.total_power(), 200.0);
        assert_eq!(tally.vote_count, 3);
    }

    #[test]
    fn test_tally_is_order_independent() {
        let mut votes = vec![
            vote(1, Polarity::Up, 3.0),
            vote(2, Polarity::Down, 5.0),
            vote(3, Polarity::Up, 7.0),
            vote(4, Polarity::Down, 1.0),
        ];
        let forward = VoteTally::from_votes(&votes).unwrap();
        votes.reverse();
        let backward = VoteTally::from_votes(&votes).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_zero_power_votes_are_counted() {
        let votes = vec![vote(1, Polarity::Up, 0.0), vote(2, Polarity::Down, 0.0)];
        let tally = VoteTally::from_votes(&votes).unwrap();
        assert_eq!(tally.vote_count, 2);
        assert!(tally.is_empty());
    }

    #[test]
    fn test_negative_power_is_rejected() {
        let votes = vec![vote(1, Polarity::Up, 5.0), vote(2, Polarity::Down, -1.0)];
        let err = VoteTally::from_votes(&votes).unwrap_err();
        assert!(matches!(err, DomainError::InconsistentTally(_)));
    }

    #[test]
    fn test_nan_power_is_rejected() {
        let votes = vec![vote(1, Polarity::Up, f64::NAN)];
        assert!(VoteTally::from_votes(&votes).is_err());
    }

    #[test]
    fn test_from_powers_validation() {
        assert!(VoteTally::from_powers(1.0, 2.0).is_ok());
        assert!(VoteTally::from_powers(-1.0, 2.0).is_err());
        assert!(VoteTally::from_powers(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_overflowing_sum_is_rejected() {
        let votes = vec![
            vote(1, Polarity::Up, f64::MAX),
            vote(2, Polarity::Up, f64::MAX),
        ];
        let err = VoteTally::from_votes(&votes).unwrap_err();
        assert!(matches!(err, DomainError::InconsistentTally(_)));

        // Each side is finite, the total is not
        assert!(VoteTally::from_powers(f64::MAX, f64::MAX).is_err());
        assert!(VoteTally::from_powers(f64::MAX, 0.0).is_ok());
    }
}
