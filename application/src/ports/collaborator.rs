//! Collaborator failures
//!
//! Every port reports failures through [`CollaboratorError`]. The engine never
//! swallows one: the operation that hit it is reported as failed and is safe
//! to retry as a whole.

use thiserror::Error;

/// Errors raised by an external collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("Vote store error: {0}")]
    VoteStore(String),

    #[error("Subject store error: {0}")]
    SubjectStore(String),

    #[error("Notification sink error: {0}")]
    NotificationSink(String),

    #[error("Activity sink error: {0}")]
    ActivitySink(String),

    #[error("Task queue error: {0}")]
    TaskQueue(String),

    #[error("{0} timed out")]
    Timeout(&'static str),
}

impl CollaboratorError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, CollaboratorError::Timeout(_))
    }
}
