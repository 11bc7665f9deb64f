//! Shared utilities for use cases.
//!
//! Contains the collaborator timeout wrapper and the per-target lock registry
//! used by the transition use case.

use crate::ports::CollaboratorError;
use stamp_domain::TargetId;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Await a collaborator call, failing with [`CollaboratorError::Timeout`]
/// once `timeout` elapses.
pub(crate) async fn bounded<T, F>(
    timeout: Option<Duration>,
    collaborator: &'static str,
    call: F,
) -> Result<T, CollaboratorError>
where
    F: Future<Output = Result<T, CollaboratorError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| CollaboratorError::Timeout(collaborator))?,
        None => call.await,
    }
}

/// One async lock per sibling set
///
/// Holding the guard for a target serializes every transition on subjects
/// attached to it, which keeps "at most one accepted sibling" true across
/// concurrent accepts.
#[derive(Default)]
pub(crate) struct SiblingLocks {
    locks: Mutex<HashMap<TargetId, Arc<AsyncMutex<()>>>>,
}

impl SiblingLocks {
    pub(crate) async fn lock(&self, target: TargetId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .locks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            // Drop entries nobody holds any more
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(target).or_default())
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
