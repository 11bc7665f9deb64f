//! Application layer for stamp-quorum
//!
//! This crate contains use cases, port definitions, and engine configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::EngineError;
pub use ports::{
    ActivitySink, CasOutcome, CollaboratorError, CompositeActivitySink, EnginePorts,
    NotificationSink, SubjectStore, TaskEnvelope, TaskKind, TaskQueue, VoteStore,
};
pub use use_cases::conclude_subject::{ConcludeOutput, ConcludeSubjectUseCase};
pub use use_cases::engine::ModerationEngine;
pub use use_cases::evaluate_subject::EvaluateSubjectUseCase;
pub use use_cases::handle_task::{TaskHandler, TaskOutcome};
pub use use_cases::sweep::{SweepReport, SweepUseCase};
pub use use_cases::transition_subject::{TransitionOutput, TransitionSubjectUseCase};
