//! Stamp lifecycle states

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a vote subject
///
/// `InProgress` is initial, `Archived` is terminal. `Denied` and `Disputed`
/// accept no further events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StampState {
    #[default]
    InProgress,
    Accepted,
    Denied,
    Disputed,
    Archived,
}

impl StampState {
    pub const ALL: [StampState; 5] = [
        StampState::InProgress,
        StampState::Accepted,
        StampState::Denied,
        StampState::Disputed,
        StampState::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StampState::InProgress => "in_progress",
            StampState::Accepted => "accepted",
            StampState::Denied => "denied",
            StampState::Disputed => "disputed",
            StampState::Archived => "archived",
        }
    }

    /// Whether voting has been closed with a decision
    pub fn is_concluded(&self) -> bool {
        matches!(self, StampState::Accepted | StampState::Denied)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, StampState::Archived)
    }
}

impl std::fmt::Display for StampState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StampState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StampState::ALL
            .into_iter()
            .find(|state| state.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| DomainError::UnknownState(s.to_string()))
    }
}
