//! Notification sink port

use super::collaborator::CollaboratorError;
use async_trait::async_trait;
use stamp_domain::Notification;

/// Port for delivering notifications to users
///
/// A returned error means the notification was not accepted; the transition
/// that produced it is then rolled back. A notification whose `id` was
/// already delivered is accepted without delivering it again.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<(), CollaboratorError>;
}
