//! Report of one CLI run, independent of how it is rendered

use chrono::{DateTime, Utc};
use serde::Serialize;
use stamp_application::TaskEnvelope;
use stamp_domain::{Activity, Notification, StampState, SubjectEvaluation, SubjectRef, VoteSubject};

/// Result of one handled task
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TaskResult {
    Applied { state: StampState },
    Skipped { reason: String },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskLine {
    #[serde(flatten)]
    pub task: TaskEnvelope,
    #[serde(flatten)]
    pub result: TaskResult,
}

/// A subject the engine could not conclude
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureLine {
    pub subject: SubjectRef,
    pub error: String,
}

/// Everything a `conclude` or `sweep` run did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// Set for sweeps: subjects created before this were due
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep_cutoff: Option<DateTime<Utc>>,
    pub evaluations: Vec<SubjectEvaluation>,
    pub failures: Vec<FailureLine>,
    pub tasks: Vec<TaskLine>,
    /// Final state of every subject
    pub subjects: Vec<VoteSubject>,
    pub notifications: Vec<Notification>,
    pub activities: Vec<Activity>,
}
