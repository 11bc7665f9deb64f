//! Domain error types

use crate::lifecycle::{StampEvent, StampState};
use thiserror::Error;

/// An event was attempted from a state that does not accept it
///
/// This is a contract error on the caller's side: whoever issued the event
/// must re-read the subject before trying again.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot {event} a stamp that is {state}")]
pub struct GuardViolation {
    pub event: StampEvent,
    pub state: StampState,
}

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Guard violation: {0}")]
    GuardViolation(#[from] GuardViolation),

    #[error("Inconsistent tally: {0}")]
    InconsistentTally(String),

    #[error("Unknown stamp state: {0}")]
    UnknownState(String),
}

impl DomainError {
    /// Check if this error is a rejected state transition
    pub fn is_guard_violation(&self) -> bool {
        matches!(self, DomainError::GuardViolation(_))
    }
}
