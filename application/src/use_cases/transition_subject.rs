//! Transition Subject use case
//!
//! Applies lifecycle events to stored subjects. Every event runs as one unit:
//!
//! ```text
//! lock sibling set
//!   └─ re-read subject, check guard
//!        └─ (accept only) archive accepted siblings
//!             └─ CAS from → to
//!                  └─ record activity, notify creator
//!                       └─ on failure: CAS to → from, restore archived
//!                          siblings to accepted, report error
//! ```
//!
//! Sibling archival is idempotent. A sibling that is no longer `accepted`
//! is skipped without emitting anything. Emitted records carry the id of
//! their transition, so a retried accept re-archives its restored siblings
//! without a second record at the sinks.

use crate::error::EngineError;
use crate::ports::{
    ActivitySink, CasOutcome, CollaboratorError, EnginePorts, NotificationSink, SubjectStore,
    VoteStore,
};
use crate::use_cases::shared::{SiblingLocks, bounded};
use stamp_domain::{
    Activity, Notification, StampEvent, StampState, SubjectId, SubjectRef, Transition,
    VoteSubject,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Output of an applied transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutput {
    pub subject: SubjectRef,
    pub event: StampEvent,
    pub from: StampState,
    pub to: StampState,
    /// Siblings archived as part of an accept
    pub archived_siblings: Vec<SubjectRef>,
}

/// Use case for driving the stamp lifecycle
#[derive(Clone)]
pub struct TransitionSubjectUseCase {
    votes: Arc<dyn VoteStore>,
    subjects: Arc<dyn SubjectStore>,
    notifications: Arc<dyn NotificationSink>,
    activities: Arc<dyn ActivitySink>,
    locks: Arc<SiblingLocks>,
    timeout: Option<Duration>,
}

impl TransitionSubjectUseCase {
    pub fn new(ports: &EnginePorts) -> Self {
        Self {
            votes: Arc::clone(&ports.votes),
            subjects: Arc::clone(&ports.subjects),
            notifications: Arc::clone(&ports.notifications),
            activities: Arc::clone(&ports.activities),
            locks: Arc::new(SiblingLocks::default()),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn accept(&self, id: SubjectId) -> Result<TransitionOutput, EngineError> {
        self.apply(id, StampEvent::Accept).await
    }

    pub async fn deny(&self, id: SubjectId) -> Result<TransitionOutput, EngineError> {
        self.apply(id, StampEvent::Deny).await
    }

    pub async fn dispute(&self, id: SubjectId) -> Result<TransitionOutput, EngineError> {
        self.apply(id, StampEvent::Dispute).await
    }

    pub async fn archive(&self, id: SubjectId) -> Result<TransitionOutput, EngineError> {
        self.apply(id, StampEvent::Archive).await
    }

    /// Apply `event` to the subject's current state
    ///
    /// Fails with [`EngineError::GuardViolation`] and leaves state untouched
    /// when the event does not apply to the current state.
    pub async fn apply(
        &self,
        id: SubjectId,
        event: StampEvent,
    ) -> Result<TransitionOutput, EngineError> {
        let target = self.load(id).await?.target.id;
        let _guard = self.locks.lock(target).await;

        // Re-read under the lock so the guard sees the latest state
        let subject = self.load(id).await?;
        let transition = Transition::plan(subject.state, event).inspect_err(|violation| {
            debug!("Rejected {} on {}: {}", event, subject.subject_ref(), violation);
        })?;

        let archived_siblings = if event == StampEvent::Accept {
            self.archive_siblings_locked(&subject).await?
        } else {
            Vec::new()
        };

        if let Err(error) = self.commit(&subject, transition).await {
            self.restore_siblings(&archived_siblings).await;
            return Err(error);
        }

        info!(
            "{} {}: {} -> {}",
            subject.subject_ref(),
            event,
            transition.from,
            transition.to
        );

        Ok(TransitionOutput {
            subject: subject.subject_ref(),
            event,
            from: transition.from,
            to: transition.to,
            archived_siblings,
        })
    }

    /// Archive every accepted sibling of `id`
    ///
    /// Returns the siblings archived by this call; siblings that are already
    /// archived are left alone.
    pub async fn archive_accepted_siblings(
        &self,
        id: SubjectId,
    ) -> Result<Vec<SubjectRef>, EngineError> {
        let subject = self.load(id).await?;
        let _guard = self.locks.lock(subject.target.id).await;
        self.archive_siblings_locked(&subject).await
    }

    /// Caller must hold the sibling set lock
    async fn archive_siblings_locked(
        &self,
        subject: &VoteSubject,
    ) -> Result<Vec<SubjectRef>, EngineError> {
        let accepted = bounded(
            self.timeout,
            "vote store",
            self.votes.accepted_siblings_of(subject.target.id),
        )
        .await?;

        let mut archived = Vec::new();
        for sibling in accepted.into_iter().filter(|s| s.id != subject.id) {
            let Some(record) = self.find(sibling.id).await? else {
                warn!("Accepted sibling {} has no stored record", sibling);
                continue;
            };
            let Ok(transition) = Transition::plan(record.state, StampEvent::Archive) else {
                debug!("Sibling {} is already {}", sibling, record.state);
                continue;
            };
            match self.commit(&record, transition).await {
                Ok(()) => {
                    info!("Archived accepted sibling {} of {}", sibling, subject.subject_ref());
                    archived.push(sibling);
                }
                Err(EngineError::GuardViolation(violation)) => {
                    debug!("Sibling {} changed concurrently: {}", sibling, violation);
                }
                Err(error) => return Err(error),
            }
        }
        Ok(archived)
    }

    /// Undo the archival of `siblings` after the accept itself failed
    ///
    /// Their records stay emitted; the retried accept emits the same ids.
    async fn restore_siblings(&self, siblings: &[SubjectRef]) {
        for sibling in siblings.iter().rev() {
            let restored = bounded(
                self.timeout,
                "subject store",
                self.subjects.compare_and_transition(
                    sibling.id,
                    StampState::Archived,
                    StampState::Accepted,
                ),
            )
            .await;

            match restored {
                Ok(CasOutcome::Applied) => debug!("Restored {} to accepted", sibling),
                Ok(CasOutcome::Conflict(actual)) => {
                    warn!("Could not restore {}: found {}", sibling, actual);
                }
                Err(error) => warn!("Could not restore {}: {}", sibling, error),
            }
        }
    }

    /// CAS the state, then emit; revert the CAS if emission fails
    async fn commit(
        &self,
        subject: &VoteSubject,
        transition: Transition,
    ) -> Result<(), EngineError> {
        let outcome = bounded(
            self.timeout,
            "subject store",
            self.subjects
                .compare_and_transition(subject.id, transition.from, transition.to),
        )
        .await?;

        if let CasOutcome::Conflict(actual) = outcome {
            return Err(stamp_domain::GuardViolation {
                event: transition.event,
                state: actual,
            }
            .into());
        }

        if let Err(error) = self.emit(subject, transition.event).await {
            warn!(
                "Emission for {} {} failed: {}",
                subject.subject_ref(),
                transition.event,
                error
            );
            self.compensate(subject, transition).await;
            return Err(error.into());
        }

        Ok(())
    }

    async fn emit(
        &self,
        subject: &VoteSubject,
        event: StampEvent,
    ) -> Result<(), CollaboratorError> {
        let activity = Activity::for_transition(subject, event);
        bounded(self.timeout, "activity sink", self.activities.record(&activity)).await?;

        let notification = Notification::for_transition(subject, event);
        bounded(
            self.timeout,
            "notification sink",
            self.notifications.notify(&notification),
        )
        .await
    }

    async fn compensate(&self, subject: &VoteSubject, transition: Transition) {
        let (from, to) = transition.reversed();
        let reverted = bounded(
            self.timeout,
            "subject store",
            self.subjects.compare_and_transition(subject.id, from, to),
        )
        .await;

        match reverted {
            Ok(CasOutcome::Applied) => {
                debug!("Reverted {} to {}", subject.subject_ref(), to);
            }
            Ok(CasOutcome::Conflict(actual)) => {
                warn!(
                    "Could not revert {}: expected {}, found {}",
                    subject.subject_ref(),
                    from,
                    actual
                );
            }
            Err(error) => {
                warn!("Could not revert {}: {}", subject.subject_ref(), error);
            }
        }
    }

    async fn find(&self, id: SubjectId) -> Result<Option<VoteSubject>, EngineError> {
        Ok(bounded(self.timeout, "subject store", self.subjects.load(id)).await?)
    }

    async fn load(&self, id: SubjectId) -> Result<VoteSubject, EngineError> {
        self.find(id).await?.ok_or(EngineError::SubjectNotFound(id))
    }
}
