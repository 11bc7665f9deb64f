//! Conclusion sweep
//!
//! Finds subjects that have been in progress longer than the configured age
//! and runs the normal conclusion on each. The sweep only decides *when* a
//! subject is checked; the outcome still comes from the thresholds.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::ports::SubjectStore;
use crate::use_cases::conclude_subject::{ConcludeOutput, ConcludeSubjectUseCase};
use crate::use_cases::shared::bounded;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use stamp_domain::SubjectRef;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of one sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    /// Subjects created before this instant were due
    pub cutoff: DateTime<Utc>,
    pub due: Vec<SubjectRef>,
    /// One entry, and one submitted task, per successfully concluded subject
    pub concluded: Vec<ConcludeOutput>,
    pub failed: Vec<(SubjectRef, EngineError)>,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Clone)]
pub struct SweepUseCase {
    subjects: Arc<dyn SubjectStore>,
    conclude: ConcludeSubjectUseCase,
    config: EngineConfig,
}

impl SweepUseCase {
    pub fn new(
        subjects: Arc<dyn SubjectStore>,
        conclude: ConcludeSubjectUseCase,
        config: EngineConfig,
    ) -> Self {
        Self {
            subjects,
            conclude,
            config,
        }
    }

    /// Conclude every subject due at `now`
    ///
    /// Fails with [`EngineError::MissingConfiguration`] when no conclusion
    /// age is configured. A failure on one subject does not stop the others;
    /// it is collected in [`SweepReport::failed`].
    pub async fn run(&self, now: DateTime<Utc>) -> Result<SweepReport, EngineError> {
        let cutoff = self
            .config
            .sweep_cutoff(now)
            .ok_or(EngineError::MissingConfiguration("sweep.conclude_in_hours"))?;

        let due = bounded(
            self.config.collaborator_timeout,
            "subject store",
            self.subjects.in_progress_created_before(cutoff),
        )
        .await?;

        let results = join_all(due.iter().map(|s| self.conclude.execute(s.id))).await;

        let mut concluded = Vec::new();
        let mut failed = Vec::new();
        for (subject, result) in due.iter().zip(results) {
            match result {
                Ok(output) => concluded.push(output),
                Err(error) => {
                    warn!("Sweep could not conclude {}: {}", subject, error);
                    failed.push((*subject, error));
                }
            }
        }

        info!(
            "Sweep at {}: {} due, {} submitted, {} failed",
            now,
            due.len(),
            concluded.len(),
            failed.len()
        );

        Ok(SweepReport {
            cutoff,
            due,
            concluded,
            failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TaskKind;
    use crate::use_cases::evaluate_subject::EvaluateSubjectUseCase;
    use crate::use_cases::test_support::{Harness, at, subject};
    use stamp_domain::{ConclusionPolicy, StampState, SubjectId, UserId, Vote, VoteSubject};

    fn sweep(harness: &Harness, config: EngineConfig) -> SweepUseCase {
        let evaluator = EvaluateSubjectUseCase::new(
            harness.store.clone(),
            harness.store.clone(),
            config.policy,
        );
        let conclude =
            ConcludeSubjectUseCase::new(evaluator, harness.store.clone(), harness.queue.clone());
        SweepUseCase::new(harness.store.clone(), conclude, config)
    }

    fn created(id: u64, state: StampState, created_at: DateTime<Utc>) -> VoteSubject {
        let mut s = subject(id, id, state);
        s.created_at = created_at;
        s
    }

    #[tokio::test]
    async fn test_sweep_requires_conclude_age() {
        let harness = Harness::new(vec![]);
        let config = EngineConfig::new(ConclusionPolicy::new(10, 75));
        let err = sweep(&harness, config).run(at(5, 0)).await.unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingConfiguration("sweep.conclude_in_hours")
        );
    }

    #[tokio::test]
    async fn test_sweep_concludes_only_due_subjects() {
        let harness = Harness::new(vec![
            created(1, StampState::InProgress, at(1, 0)),
            created(2, StampState::InProgress, at(2, 12)),
            created(3, StampState::Accepted, at(1, 0)),
        ]);
        harness.store.add_votes(
            1,
            vec![Vote::up(UserId(1), SubjectId(1), 20.0)],
        );
        let config = EngineConfig::new(ConclusionPolicy::new(10, 75)).with_conclude_after_hours(24);

        let report = sweep(&harness, config).run(at(3, 0)).await.unwrap();

        assert_eq!(report.cutoff, at(2, 0));
        assert_eq!(report.due, vec![SubjectRef::stamp(SubjectId(1))]);
        assert_eq!(report.concluded.len(), 1);
        assert_eq!(report.concluded[0].task.kind, TaskKind::Accept);
        assert!(report.is_clean());
        // The sweep dispatches but never transitions
        assert_eq!(harness.store.state(1), StampState::InProgress);
    }

    #[tokio::test]
    async fn test_sweep_does_not_force_outcome() {
        let harness = Harness::new(vec![created(1, StampState::InProgress, at(1, 0))]);
        let config = EngineConfig::new(ConclusionPolicy::new(10, 75)).with_conclude_after_hours(1);

        let report = sweep(&harness, config).run(at(9, 0)).await.unwrap();
        assert_eq!(report.concluded[0].task.kind, TaskKind::Dispute);
    }

    #[tokio::test]
    async fn test_sweep_collects_failures() {
        let harness = Harness::new(vec![
            created(1, StampState::InProgress, at(1, 0)),
            created(2, StampState::InProgress, at(1, 0)),
        ]);
        harness
            .store
            .fail_votes
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let config = EngineConfig::new(ConclusionPolicy::new(10, 75)).with_conclude_after_hours(1);

        let report = sweep(&harness, config).run(at(9, 0)).await.unwrap();
        assert_eq!(report.due.len(), 2);
        assert!(report.concluded.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert!(!report.is_clean());
    }
}
