//! In-memory vote and subject stores
//!
//! The subject store's compare-and-transition runs under one write lock, so
//! the state check and the update are a single step.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use stamp_application::{CasOutcome, CollaboratorError, SubjectStore, VoteStore};
use stamp_domain::{StampState, SubjectId, SubjectRef, TargetId, Vote, VoteSubject};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Subjects keyed by id
#[derive(Debug, Default)]
pub struct InMemorySubjectStore {
    subjects: RwLock<BTreeMap<SubjectId, VoteSubject>>,
}

impl InMemorySubjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, subject: VoteSubject) {
        self.subjects.write().await.insert(subject.id, subject);
    }

    /// All subjects, ordered by id
    pub async fn all(&self) -> Vec<VoteSubject> {
        self.subjects.read().await.values().cloned().collect()
    }

    /// Accepted subjects attached to `target`
    pub async fn accepted_on(&self, target: TargetId) -> Vec<SubjectRef> {
        self.subjects
            .read()
            .await
            .values()
            .filter(|s| s.target.id == target && s.state == StampState::Accepted)
            .map(VoteSubject::subject_ref)
            .collect()
    }
}

#[async_trait]
impl SubjectStore for InMemorySubjectStore {
    async fn load(&self, id: SubjectId) -> Result<Option<VoteSubject>, CollaboratorError> {
        Ok(self.subjects.read().await.get(&id).cloned())
    }

    async fn compare_and_transition(
        &self,
        id: SubjectId,
        from: StampState,
        to: StampState,
    ) -> Result<CasOutcome, CollaboratorError> {
        let mut subjects = self.subjects.write().await;
        let subject = subjects
            .get_mut(&id)
            .ok_or_else(|| CollaboratorError::SubjectStore(format!("no stamp {}", id)))?;

        if subject.state != from {
            debug!("CAS on stamp {} expected {}, found {}", id, from, subject.state);
            return Ok(CasOutcome::Conflict(subject.state));
        }
        subject.state = to;
        Ok(CasOutcome::Applied)
    }

    async fn in_progress_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<SubjectRef>, CollaboratorError> {
        Ok(self
            .subjects
            .read()
            .await
            .values()
            .filter(|s| s.state == StampState::InProgress && s.created_at < cutoff)
            .map(VoteSubject::subject_ref)
            .collect())
    }
}

/// Votes keyed by subject; sibling lookups go to the subject store
#[derive(Debug)]
pub struct InMemoryVoteStore {
    votes: RwLock<BTreeMap<SubjectId, Vec<Vote>>>,
    subjects: Arc<InMemorySubjectStore>,
}

impl InMemoryVoteStore {
    pub fn new(subjects: Arc<InMemorySubjectStore>) -> Self {
        Self {
            votes: RwLock::new(BTreeMap::new()),
            subjects,
        }
    }

    /// Record a vote, replacing an earlier vote by the same caster
    pub async fn cast(&self, vote: Vote) {
        let mut votes = self.votes.write().await;
        let cast = votes.entry(vote.subject).or_default();
        cast.retain(|v| v.caster != vote.caster);
        cast.push(vote);
    }
}

#[async_trait]
impl VoteStore for InMemoryVoteStore {
    async fn votes_for(&self, subject: SubjectId) -> Result<Vec<Vote>, CollaboratorError> {
        Ok(self
            .votes
            .read()
            .await
            .get(&subject)
            .cloned()
            .unwrap_or_default())
    }

    async fn accepted_siblings_of(
        &self,
        target: TargetId,
    ) -> Result<Vec<SubjectRef>, CollaboratorError> {
        Ok(self.subjects.accepted_on(target).await)
    }
}
