//! Composite activity sink: delegates to multiple sinks.
//!
//! Used to record activities in the in-memory feed and the JSONL audit log
//! at the same time.
//!
//! ```text
//! TransitionSubjectUseCase ── record(&activity)
//!                                   |
//!                 +-----------------+-----------------+
//!                 |                                   |
//!         InMemoryActivitySink                JsonlActivityLog
//! ```

use super::activity_sink::ActivitySink;
use super::collaborator::CollaboratorError;
use async_trait::async_trait;
use stamp_domain::Activity;
use std::sync::Arc;

/// An activity sink that records into every delegate, in order.
///
/// Stops at the first failing delegate; earlier delegates keep the record.
pub struct CompositeActivitySink {
    delegates: Vec<Arc<dyn ActivitySink>>,
}

impl CompositeActivitySink {
    pub fn new(delegates: Vec<Arc<dyn ActivitySink>>) -> Self {
        Self { delegates }
    }
}

#[async_trait]
impl ActivitySink for CompositeActivitySink {
    async fn record(&self, activity: &Activity) -> Result<(), CollaboratorError> {
        for delegate in &self.delegates {
            delegate.record(activity).await?;
        }
        Ok(())
    }
}
