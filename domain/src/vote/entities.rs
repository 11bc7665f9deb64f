//! Vote primitives
//!
//! A vote is cast once by one user on one subject and never changes. Its
//! weight is computed from the caster's reputation at cast time by whoever
//! records the vote; the engine takes it as given.

use crate::core::ids::{SubjectId, UserId};
use serde::{Deserialize, Serialize};

/// Direction of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Up,
    Down,
}

impl Polarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Up => "up",
            Polarity::Down => "down",
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weight carried by a single vote
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VotingPower(pub f64);

impl VotingPower {
    pub const ZERO: VotingPower = VotingPower(0.0);

    /// Derive voting power from a reputation score
    ///
    /// Non-positive reputation carries no weight; otherwise the weight grows
    /// with the order of magnitude of the reputation.
    ///
    /// ```
    /// use stamp_domain::VotingPower;
    ///
    /// assert_eq!(VotingPower::from_reputation(0), VotingPower::ZERO);
    /// assert!((VotingPower::from_reputation(1000).value() - 3.0).abs() < 1e-9);
    /// ```
    pub fn from_reputation(reputation: i64) -> Self {
        if reputation <= 0 {
            Self::ZERO
        } else {
            VotingPower((reputation as f64).log10())
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether this power can take part in a tally
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl From<f64> for VotingPower {
    fn from(value: f64) -> Self {
        VotingPower(value)
    }
}

/// A single weighted vote on a vote subject
///
/// # Example
///
/// ```
/// use stamp_domain::{Polarity, SubjectId, UserId, Vote};
///
/// let vote = Vote::up(UserId(1), SubjectId(10), 2.5);
/// assert_eq!(vote.polarity, Polarity::Up);
/// assert_eq!(vote.power.value(), 2.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    /// Who cast the vote
    pub caster: UserId,
    /// The subject voted on
    pub subject: SubjectId,
    pub polarity: Polarity,
    pub power: VotingPower,
}

impl Vote {
    pub fn new(
        caster: UserId,
        subject: SubjectId,
        polarity: Polarity,
        power: impl Into<VotingPower>,
    ) -> Self {
        Self {
            caster,
            subject,
            polarity,
            power: power.into(),
        }
    }

    /// Create an upvote
    pub fn up(caster: UserId, subject: SubjectId, power: impl Into<VotingPower>) -> Self {
        Self::new(caster, subject, Polarity::Up, power)
    }

    /// Create a downvote
    pub fn down(caster: UserId, subject: SubjectId, power: impl Into<VotingPower>) -> Self {
        Self::new(caster, subject, Polarity::Down, power)
    }

    pub fn is_up(&self) -> bool {
        self.polarity == Polarity::Up
    }
}
