//! Moderation engine
//!
//! Wires every use case to one set of ports and one configuration. This is
//! the entry point adapters and the CLI talk to.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::ports::{EnginePorts, TaskEnvelope};
use crate::use_cases::conclude_subject::{ConcludeOutput, ConcludeSubjectUseCase};
use crate::use_cases::evaluate_subject::EvaluateSubjectUseCase;
use crate::use_cases::handle_task::{TaskHandler, TaskOutcome};
use crate::use_cases::sweep::{SweepReport, SweepUseCase};
use crate::use_cases::transition_subject::{TransitionOutput, TransitionSubjectUseCase};
use chrono::{DateTime, Utc};
use stamp_domain::{MajorityType, StampEvent, SubjectEvaluation, SubjectId, SubjectRef};

#[derive(Clone)]
pub struct ModerationEngine {
    config: EngineConfig,
    evaluator: EvaluateSubjectUseCase,
    conclude: ConcludeSubjectUseCase,
    transitions: TransitionSubjectUseCase,
    handler: TaskHandler,
    sweep: SweepUseCase,
}

impl ModerationEngine {
    pub fn new(ports: EnginePorts, config: EngineConfig) -> Self {
        let timeout = config.collaborator_timeout;

        let evaluator = EvaluateSubjectUseCase::new(
            ports.votes.clone(),
            ports.subjects.clone(),
            config.policy,
        )
        .with_timeout(timeout);
        let conclude = ConcludeSubjectUseCase::new(
            evaluator.clone(),
            ports.subjects.clone(),
            ports.tasks.clone(),
        )
        .with_timeout(timeout);
        let transitions = TransitionSubjectUseCase::new(&ports).with_timeout(timeout);
        let handler = TaskHandler::new(transitions.clone());
        let sweep = SweepUseCase::new(ports.subjects.clone(), conclude.clone(), config.clone());

        Self {
            config,
            evaluator,
            conclude,
            transitions,
            handler,
            sweep,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ==================== Evaluation ====================

    pub async fn evaluate(&self, id: SubjectId) -> Result<SubjectEvaluation, EngineError> {
        self.evaluator.execute(id).await
    }

    pub async fn concludable(&self, id: SubjectId) -> Result<bool, EngineError> {
        self.evaluator.concludable(id).await
    }

    pub async fn majority_size(&self, id: SubjectId) -> Result<u8, EngineError> {
        self.evaluator.majority_size(id).await
    }

    pub async fn majority_type(&self, id: SubjectId) -> Result<MajorityType, EngineError> {
        self.evaluator.majority_type(id).await
    }

    // ==================== Conclusion ====================

    pub async fn conclude(&self, id: SubjectId) -> Result<ConcludeOutput, EngineError> {
        self.conclude.execute(id).await
    }

    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<SweepReport, EngineError> {
        self.sweep.run(now).await
    }

    pub async fn handle_task(&self, task: TaskEnvelope) -> Result<TaskOutcome, EngineError> {
        self.handler.handle(task).await
    }

    pub fn task_handler(&self) -> TaskHandler {
        self.handler.clone()
    }

    // ==================== Lifecycle ====================

    pub async fn accept(&self, id: SubjectId) -> Result<TransitionOutput, EngineError> {
        self.transitions.accept(id).await
    }

    pub async fn deny(&self, id: SubjectId) -> Result<TransitionOutput, EngineError> {
        self.transitions.deny(id).await
    }

    pub async fn dispute(&self, id: SubjectId) -> Result<TransitionOutput, EngineError> {
        self.transitions.dispute(id).await
    }

    pub async fn archive(&self, id: SubjectId) -> Result<TransitionOutput, EngineError> {
        self.transitions.archive(id).await
    }

    pub async fn apply(
        &self,
        id: SubjectId,
        event: StampEvent,
    ) -> Result<TransitionOutput, EngineError> {
        self.transitions.apply(id, event).await
    }

    pub async fn archive_accepted_siblings(
        &self,
        id: SubjectId,
    ) -> Result<Vec<SubjectRef>, EngineError> {
        self.transitions.archive_accepted_siblings(id).await
    }
}
