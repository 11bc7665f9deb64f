//! Majority evaluation
//!
//! Majority size is the share of total power held by the larger side, as a
//! rounded percentage. It is 50 for a tie and 100 for a one-sided vote.

use serde::{Deserialize, Serialize};

/// Which side holds the majority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MajorityType {
    Upvoters,
    Downvoters,
    Even,
}

impl MajorityType {
    /// Compare two powers
    pub fn from_powers(up: f64, down: f64) -> Self {
        if up > down {
            MajorityType::Upvoters
        } else if down > up {
            MajorityType::Downvoters
        } else {
            MajorityType::Even
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MajorityType::Upvoters => "upvoters",
            MajorityType::Downvoters => "downvoters",
            MajorityType::Even => "even",
        }
    }
}

impl std::fmt::Display for MajorityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percentage share of the larger side
///
/// Returns 0 when there is no power at all; callers must never conclude on
/// that value.
pub fn majority_size(up: f64, down: f64) -> u8 {
    let total = up + down;
    if total <= 0.0 {
        return 0;
    }
    (up.max(down) / total * 100.0).round() as u8
}

/// Majority size and type taken from the same pair of powers
///
/// # Example
///
/// ```
/// use stamp_domain::{Majority, MajorityType};
///
/// let majority = Majority::from_powers(40.0, 60.0);
/// assert_eq!(majority.size, 60);
/// assert_eq!(majority.kind, MajorityType::Downvoters);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Majority {
    pub size: u8,
    #[serde(rename = "type")]
    pub kind: MajorityType,
}

impl Majority {
    pub fn from_powers(up: f64, down: f64) -> Self {
        Self {
            size: majority_size(up, down),
            kind: MajorityType::from_powers(up, down),
        }
    }
}
