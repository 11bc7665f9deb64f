//! Task queue backed by a tokio unbounded channel

use async_trait::async_trait;
use stamp_application::{CollaboratorError, TaskEnvelope, TaskQueue};
use tokio::sync::mpsc;
use tracing::debug;

/// Sending half of the in-process task queue
#[derive(Debug, Clone)]
pub struct ChannelTaskQueue {
    task_tx: mpsc::UnboundedSender<TaskEnvelope>,
}

impl ChannelTaskQueue {
    /// Create the queue and the receiver a [`TaskWorker`](super::TaskWorker) consumes
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TaskEnvelope>) {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        (Self { task_tx }, task_rx)
    }
}

#[async_trait]
impl TaskQueue for ChannelTaskQueue {
    async fn submit(&self, task: TaskEnvelope) -> Result<(), CollaboratorError> {
        self.task_tx
            .send(task)
            .map_err(|_| CollaboratorError::TaskQueue("worker has shut down".to_string()))?;
        debug!("Queued {}", task);
        Ok(())
    }
}
