//! In-memory notification and activity sinks
//!
//! Keep everything they receive, in arrival order, for the CLI report and
//! for tests. A record whose id is already held is not stored twice.

use async_trait::async_trait;
use stamp_application::{ActivitySink, CollaboratorError, NotificationSink};
use stamp_domain::{Activity, Notification};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryNotificationSink {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }
}

#[async_trait]
impl NotificationSink for InMemoryNotificationSink {
    async fn notify(&self, notification: &Notification) -> Result<(), CollaboratorError> {
        let mut notifications = self.notifications.write().await;
        if !notifications.iter().any(|n| n.id == notification.id) {
            notifications.push(notification.clone());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryActivitySink {
    activities: RwLock<Vec<Activity>>,
}

impl InMemoryActivitySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn activities(&self) -> Vec<Activity> {
        self.activities.read().await.clone()
    }
}

#[async_trait]
impl ActivitySink for InMemoryActivitySink {
    async fn record(&self, activity: &Activity) -> Result<(), CollaboratorError> {
        let mut activities = self.activities.write().await;
        if !activities.iter().any(|a| a.id == activity.id) {
            activities.push(activity.clone());
        }
        Ok(())
    }
}
