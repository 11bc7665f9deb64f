//! Stamp lifecycle events

use serde::{Deserialize, Serialize};

/// An event that drives a vote subject between states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StampEvent {
    Accept,
    Deny,
    Dispute,
    Archive,
}

impl StampEvent {
    pub const ALL: [StampEvent; 4] = [
        StampEvent::Accept,
        StampEvent::Deny,
        StampEvent::Dispute,
        StampEvent::Archive,
    ];

    /// Event name as it appears in activity keys
    pub fn as_str(&self) -> &'static str {
        match self {
            StampEvent::Accept => "accept",
            StampEvent::Deny => "deny",
            StampEvent::Dispute => "dispute",
            StampEvent::Archive => "archive",
        }
    }
}

impl std::fmt::Display for StampEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
