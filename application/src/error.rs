//! Engine error types

use crate::ports::CollaboratorError;
use stamp_domain::{DomainError, GuardViolation, SubjectId};
use thiserror::Error;

/// Errors returned by the engine's use cases
///
/// | Variant | Retry? |
/// |---------|--------|
/// | `GuardViolation` | no, re-read state first |
/// | `Collaborator` | yes, the whole operation |
/// | `InconsistentTally` | no, data must be repaired |
/// | `UnknownState` | no, data must be repaired |
/// | `MissingConfiguration` | no, fatal at startup |
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Stamp {0} not found")]
    SubjectNotFound(SubjectId),

    #[error("Guard violation: {0}")]
    GuardViolation(#[from] GuardViolation),

    #[error("Inconsistent tally: {0}")]
    InconsistentTally(String),

    #[error("Unknown stamp state: {0}")]
    UnknownState(String),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(&'static str),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl EngineError {
    /// Check if this error is a rejected state transition
    pub fn is_guard_violation(&self) -> bool {
        matches!(self, EngineError::GuardViolation(_))
    }

    /// Whether retrying the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::Collaborator(_))
    }
}

impl From<DomainError> for EngineError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::GuardViolation(violation) => EngineError::GuardViolation(violation),
            DomainError::InconsistentTally(reason) => EngineError::InconsistentTally(reason),
            DomainError::UnknownState(state) => EngineError::UnknownState(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stamp_domain::{StampEvent, StampState};

    #[test]
    fn test_domain_error_conversion() {
        let violation = GuardViolation {
            event: StampEvent::Deny,
            state: StampState::Accepted,
        };
        let error: EngineError = DomainError::GuardViolation(violation).into();
        assert_eq!(error, EngineError::GuardViolation(violation));
        assert!(error.is_guard_violation());
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_unknown_state_keeps_its_own_variant() {
        let error: EngineError = DomainError::UnknownState("pending".to_string()).into();
        assert_eq!(error, EngineError::UnknownState("pending".to_string()));
        assert_eq!(error.to_string(), "Unknown stamp state: pending");
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_collaborator_errors_are_retryable() {
        let error: EngineError = CollaboratorError::TaskQueue("closed".to_string()).into();
        assert!(error.is_retryable());
        assert_eq!(error.to_string(), "Task queue error: closed");
    }
}
