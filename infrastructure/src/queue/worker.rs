//! Task worker
//!
//! Pulls tasks off the channel and hands them to the [`TaskHandler`].
//! Retryable failures are attempted again up to `max_attempts` times; stale
//! tasks are reported as skipped.

use stamp_application::{EngineError, TaskEnvelope, TaskHandler, TaskOutcome};
use stamp_domain::{GuardViolation, StampState};
use tokio::sync::mpsc;
use tracing::{debug, warn};

const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// What the worker did with the tasks it received
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerReport {
    pub applied: Vec<(TaskEnvelope, StampState)>,
    pub skipped: Vec<(TaskEnvelope, GuardViolation)>,
    pub failed: Vec<(TaskEnvelope, EngineError)>,
}

impl WorkerReport {
    pub fn handled(&self) -> usize {
        self.applied.len() + self.skipped.len() + self.failed.len()
    }

    fn push(&mut self, task: TaskEnvelope, result: Result<TaskOutcome, EngineError>) {
        match result {
            Ok(TaskOutcome::Applied(state)) => self.applied.push((task, state)),
            Ok(TaskOutcome::Skipped(violation)) => self.skipped.push((task, violation)),
            Err(error) => self.failed.push((task, error)),
        }
    }
}

pub struct TaskWorker {
    task_rx: mpsc::UnboundedReceiver<TaskEnvelope>,
    handler: TaskHandler,
    max_attempts: usize,
}

impl TaskWorker {
    pub fn new(task_rx: mpsc::UnboundedReceiver<TaskEnvelope>, handler: TaskHandler) -> Self {
        Self {
            task_rx,
            handler,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Handle tasks until every queue handle has been dropped
    pub async fn run(mut self) -> WorkerReport {
        let mut report = WorkerReport::default();
        while let Some(task) = self.task_rx.recv().await {
            let result = self.handle(task).await;
            report.push(task, result);
        }
        report
    }

    /// Handle the tasks queued so far, then return
    pub async fn drain(&mut self) -> WorkerReport {
        let mut report = WorkerReport::default();
        while let Ok(task) = self.task_rx.try_recv() {
            let result = self.handle(task).await;
            report.push(task, result);
        }
        report
    }

    async fn handle(&self, task: TaskEnvelope) -> Result<TaskOutcome, EngineError> {
        let mut attempt = 1;
        loop {
            match self.handler.handle(task).await {
                Err(error) if error.is_retryable() && attempt < self.max_attempts => {
                    debug!("Retrying {} (attempt {}): {}", task, attempt, error);
                    attempt += 1;
                }
                Err(error) => {
                    warn!("Giving up on {} after {} attempt(s): {}", task, attempt, error);
                    return Err(error);
                }
                outcome => return outcome,
            }
        }
    }
}
