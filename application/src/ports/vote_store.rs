//! Vote store port
//!
//! Read access to cast votes and to the accepted subjects of a sibling set.
//! Recording votes, and enforcing one vote per caster per subject, happen
//! outside the engine.

use super::collaborator::CollaboratorError;
use async_trait::async_trait;
use stamp_domain::{SubjectId, SubjectRef, TargetId, Vote};

/// Port for reading votes
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// All votes cast on a subject
    async fn votes_for(&self, subject: SubjectId) -> Result<Vec<Vote>, CollaboratorError>;

    /// Subjects on `target` that are currently `accepted`
    async fn accepted_siblings_of(
        &self,
        target: TargetId,
    ) -> Result<Vec<SubjectRef>, CollaboratorError>;
}
