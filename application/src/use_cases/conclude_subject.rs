//! Conclude Subject use case
//!
//! The dispatcher: evaluates a subject and submits exactly one follow-up task.
//!
//! ```text
//! not concludable            ─▶ Dispute
//! concludable + upvoters     ─▶ Accept
//! concludable + downvoters   ─▶ Deny
//! concludable + even         ─▶ Dispute
//! ```
//!
//! No state changes here. The task handler applies the event later against
//! current data, and its guards reject anything the snapshot made stale.

use crate::error::EngineError;
use crate::ports::{SubjectStore, TaskEnvelope, TaskKind, TaskQueue};
use crate::use_cases::evaluate_subject::EvaluateSubjectUseCase;
use crate::use_cases::shared::bounded;
use stamp_domain::{StampState, SubjectEvaluation, SubjectId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Output of a conclusion
#[derive(Debug, Clone, PartialEq)]
pub struct ConcludeOutput {
    /// The snapshot the decision was made from
    pub evaluation: SubjectEvaluation,
    /// The single task that was submitted
    pub task: TaskEnvelope,
}

/// Use case for concluding a subject
#[derive(Clone)]
pub struct ConcludeSubjectUseCase {
    evaluator: EvaluateSubjectUseCase,
    subjects: Arc<dyn SubjectStore>,
    tasks: Arc<dyn TaskQueue>,
    timeout: Option<Duration>,
}

impl ConcludeSubjectUseCase {
    pub fn new(
        evaluator: EvaluateSubjectUseCase,
        subjects: Arc<dyn SubjectStore>,
        tasks: Arc<dyn TaskQueue>,
    ) -> Self {
        Self {
            evaluator,
            subjects,
            tasks,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Evaluate `id` and submit its follow-up task
    pub async fn execute(&self, id: SubjectId) -> Result<ConcludeOutput, EngineError> {
        let subject = bounded(self.timeout, "subject store", self.subjects.load(id))
            .await?
            .ok_or(EngineError::SubjectNotFound(id))?;

        if subject.state != StampState::InProgress {
            warn!(
                "Concluding {} which is already {}; the task will be rejected",
                subject.subject_ref(),
                subject.state
            );
        }

        let evaluation = self.evaluator.evaluate(&subject).await?;
        let task = TaskEnvelope::new(TaskKind::from(evaluation.decision), evaluation.subject);

        bounded(self.timeout, "task queue", self.tasks.submit(task)).await?;

        info!(
            "Submitted {} task for {} (power={}, majority={} {})",
            task.kind,
            task.subject,
            evaluation.total_power(),
            evaluation.majority.size,
            evaluation.majority.kind
        );

        Ok(ConcludeOutput { evaluation, task })
    }
}
