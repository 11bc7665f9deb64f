//! Activity sink port
//!
//! Activities are the audit trail of every lifecycle transition
//! (`stamp.accept`, `stamp.archive`, ...). Storage is external.

use super::collaborator::CollaboratorError;
use async_trait::async_trait;
use stamp_domain::Activity;

/// Port for recording activities
///
/// An activity whose `id` was already recorded is accepted without
/// recording it again, so a retried transition leaves one record.
#[async_trait]
pub trait ActivitySink: Send + Sync {
    async fn record(&self, activity: &Activity) -> Result<(), CollaboratorError>;
}
