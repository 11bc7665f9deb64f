//! Evaluate Subject use case
//!
//! Reads one vote snapshot for a subject and derives tally, majority and the
//! conclusion decision from it.

use crate::error::EngineError;
use crate::ports::{SubjectStore, VoteStore};
use crate::use_cases::shared::bounded;
use stamp_domain::{
    ConclusionPolicy, MajorityType, SubjectEvaluation, SubjectId, VoteSubject, VoteTally,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Use case for evaluating the votes on a subject
#[derive(Clone)]
pub struct EvaluateSubjectUseCase {
    votes: Arc<dyn VoteStore>,
    subjects: Arc<dyn SubjectStore>,
    policy: ConclusionPolicy,
    timeout: Option<Duration>,
}

impl EvaluateSubjectUseCase {
    pub fn new(
        votes: Arc<dyn VoteStore>,
        subjects: Arc<dyn SubjectStore>,
        policy: ConclusionPolicy,
    ) -> Self {
        Self {
            votes,
            subjects,
            policy,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn policy(&self) -> &ConclusionPolicy {
        &self.policy
    }

    /// Evaluate the subject's current votes
    pub async fn execute(&self, id: SubjectId) -> Result<SubjectEvaluation, EngineError> {
        let subject = self.load(id).await?;
        self.evaluate(&subject).await
    }

    /// Evaluate an already loaded subject
    pub async fn evaluate(&self, subject: &VoteSubject) -> Result<SubjectEvaluation, EngineError> {
        let votes = bounded(self.timeout, "vote store", self.votes.votes_for(subject.id)).await?;
        let tally = VoteTally::from_votes(&votes)?;
        let evaluation = SubjectEvaluation::new(subject.subject_ref(), tally, &self.policy);

        debug!(
            "Evaluated {}: up={} down={} majority={} ({}) concludable={}",
            evaluation.subject,
            tally.upvote_power,
            tally.downvote_power,
            evaluation.majority.size,
            evaluation.majority.kind,
            evaluation.concludable
        );

        Ok(evaluation)
    }

    pub async fn concludable(&self, id: SubjectId) -> Result<bool, EngineError> {
        Ok(self.execute(id).await?.concludable)
    }

    pub async fn majority_size(&self, id: SubjectId) -> Result<u8, EngineError> {
        Ok(self.execute(id).await?.majority.size)
    }

    pub async fn majority_type(&self, id: SubjectId) -> Result<MajorityType, EngineError> {
        Ok(self.execute(id).await?.majority.kind)
    }

    async fn load(&self, id: SubjectId) -> Result<VoteSubject, EngineError> {
        bounded(self.timeout, "subject store", self.subjects.load(id))
            .await?
            .ok_or(EngineError::SubjectNotFound(id))
    }
}
