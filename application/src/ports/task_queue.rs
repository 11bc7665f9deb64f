//! Task queue port
//!
//! Concluding a subject hands one task to an asynchronous job surface. The
//! task carries identity only; the handler re-reads current data when it
//! runs, so the queue may deliver at least once and in any order across
//! subjects.

use super::collaborator::CollaboratorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stamp_domain::{Decision, SubjectRef};

/// The follow-up work a task performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Accept,
    Deny,
    Dispute,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Accept => "accept",
            TaskKind::Deny => "deny",
            TaskKind::Dispute => "dispute",
        }
    }
}

impl From<Decision> for TaskKind {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accept => TaskKind::Accept,
            Decision::Deny => TaskKind::Deny,
            Decision::Dispute => TaskKind::Dispute,
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A submitted task: what to do, and to which subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskEnvelope {
    pub kind: TaskKind,
    pub subject: SubjectRef,
}

impl TaskEnvelope {
    pub fn new(kind: TaskKind, subject: SubjectRef) -> Self {
        Self { kind, subject }
    }
}

impl std::fmt::Display for TaskEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.subject)
    }
}

/// Port for submitting tasks
///
/// `submit` returns once the queue has taken the task; it does not wait for
/// the task to run.
#[async_trait]
pub trait TaskQueue: Send + Sync {
    async fn submit(&self, task: TaskEnvelope) -> Result<(), CollaboratorError>;
}
