//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//!
//! | Port | Direction | Used by |
//! |------|-----------|---------|
//! | [`VoteStore`] | read | evaluation, sibling archival |
//! | [`SubjectStore`] | read + CAS | evaluation, transitions, sweep |
//! | [`NotificationSink`] | write | transitions |
//! | [`ActivitySink`] | write | transitions |
//! | [`TaskQueue`] | write | conclusion dispatch |

pub mod activity_sink;
pub mod collaborator;
pub mod composite_activity;
pub mod notification_sink;
pub mod subject_store;
pub mod task_queue;
pub mod vote_store;

pub use activity_sink::ActivitySink;
pub use collaborator::CollaboratorError;
pub use composite_activity::CompositeActivitySink;
pub use notification_sink::NotificationSink;
pub use subject_store::{CasOutcome, SubjectStore};
pub use task_queue::{TaskEnvelope, TaskKind, TaskQueue};
pub use vote_store::VoteStore;

use std::sync::Arc;

/// The full set of collaborators the engine runs against
#[derive(Clone)]
pub struct EnginePorts {
    pub votes: Arc<dyn VoteStore>,
    pub subjects: Arc<dyn SubjectStore>,
    pub notifications: Arc<dyn NotificationSink>,
    pub activities: Arc<dyn ActivitySink>,
    pub tasks: Arc<dyn TaskQueue>,
}
