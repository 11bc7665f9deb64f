//! Task handler
//!
//! Consumes the tasks the dispatcher submitted and applies them through the
//! transition use case. A task is handled against current state, never
//! against the snapshot it was decided from.

use crate::error::EngineError;
use crate::ports::{TaskEnvelope, TaskKind};
use crate::use_cases::transition_subject::TransitionSubjectUseCase;
use stamp_domain::{GuardViolation, StampEvent, StampState};
use tracing::{info, warn};

/// What became of a handled task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The event was applied; holds the new state
    Applied(StampState),
    /// The subject had already moved on; nothing changed
    Skipped(GuardViolation),
}

impl TaskOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TaskOutcome::Applied(_))
    }
}

/// Applies [`TaskEnvelope`]s
#[derive(Clone)]
pub struct TaskHandler {
    transitions: TransitionSubjectUseCase,
}

impl TaskHandler {
    pub fn new(transitions: TransitionSubjectUseCase) -> Self {
        Self { transitions }
    }

    /// Lifecycle event each task kind applies
    pub fn event_for(kind: TaskKind) -> StampEvent {
        match kind {
            TaskKind::Accept => StampEvent::Accept,
            TaskKind::Deny => StampEvent::Deny,
            TaskKind::Dispute => StampEvent::Dispute,
        }
    }

    /// Handle one task
    ///
    /// A stale task (guard violation) is reported as [`TaskOutcome::Skipped`].
    /// Collaborator failures are returned so the caller can retry the task.
    pub async fn handle(&self, task: TaskEnvelope) -> Result<TaskOutcome, EngineError> {
        let event = Self::event_for(task.kind);
        match self.transitions.apply(task.subject.id, event).await {
            Ok(output) => {
                info!("Handled {} task: {} is now {}", task.kind, task.subject, output.to);
                Ok(TaskOutcome::Applied(output.to))
            }
            Err(EngineError::GuardViolation(violation)) => {
                warn!("Skipped stale {} task for {}: {}", task.kind, task.subject, violation);
                Ok(TaskOutcome::Skipped(violation))
            }
            Err(error) => Err(error),
        }
    }
}
