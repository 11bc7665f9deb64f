//! Subject store port
//!
//! Persisted lifecycle state of vote subjects. The only write is a
//! compare-and-swap on the current state, so two writers can never both pass
//! the same guard.

use super::collaborator::CollaboratorError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stamp_domain::{StampState, SubjectId, SubjectRef, VoteSubject};

/// Result of a compare-and-swap on a subject's state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// The state was `from` and is now `to`
    Applied,
    /// The state was not `from`; carries the state actually found
    Conflict(StampState),
}

impl CasOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CasOutcome::Applied)
    }
}

/// Port for subject records and their state
#[async_trait]
pub trait SubjectStore: Send + Sync {
    /// Load a subject, `None` if it does not exist
    async fn load(&self, id: SubjectId) -> Result<Option<VoteSubject>, CollaboratorError>;

    /// Current state of a subject, `None` if it does not exist
    async fn current_state(&self, id: SubjectId) -> Result<Option<StampState>, CollaboratorError> {
        Ok(self.load(id).await?.map(|subject| subject.state))
    }

    /// Atomically move `id` from `from` to `to`
    ///
    /// A missing subject is an error, not a conflict.
    async fn compare_and_transition(
        &self,
        id: SubjectId,
        from: StampState,
        to: StampState,
    ) -> Result<CasOutcome, CollaboratorError>;

    /// Subjects still `in_progress` that were created before `cutoff`
    async fn in_progress_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<SubjectRef>, CollaboratorError>;
}
