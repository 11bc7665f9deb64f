//! Mock ports shared by the use case tests.

use crate::ports::{
    ActivitySink, CasOutcome, CollaboratorError, EnginePorts, NotificationSink, SubjectStore,
    TaskEnvelope, TaskQueue, VoteStore,
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use stamp_domain::{
    Activity, Notification, StampState, SubjectId, SubjectRef, TargetId, TargetRef, UserId, Vote,
    VoteSubject,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

pub(crate) fn subject(id: u64, target: u64, state: StampState) -> VoteSubject {
    VoteSubject::new(
        SubjectId(id),
        UserId(100 + id as i64),
        TargetRef {
            id: TargetId(target),
            creator: UserId(900),
        },
        at(1, 0),
    )
    .with_state(state)
}

// === Mock implementations ===

#[derive(Default)]
pub(crate) struct MockStore {
    subjects: Mutex<HashMap<SubjectId, VoteSubject>>,
    votes: Mutex<HashMap<SubjectId, Vec<Vote>>>,
    pub(crate) fail_votes: AtomicBool,
    /// Every CAS call, applied or not
    pub(crate) cas_calls: Mutex<Vec<(SubjectId, StampState, StampState)>>,
}

impl MockStore {
    pub(crate) fn with_subjects(subjects: Vec<VoteSubject>) -> Self {
        let store = Self::default();
        for s in subjects {
            store.insert(s);
        }
        store
    }

    pub(crate) fn insert(&self, subject: VoteSubject) {
        self.subjects.lock().unwrap().insert(subject.id, subject);
    }

    pub(crate) fn add_votes(&self, id: u64, votes: Vec<Vote>) {
        self.votes
            .lock()
            .unwrap()
            .entry(SubjectId(id))
            .or_default()
            .extend(votes);
    }

    pub(crate) fn state(&self, id: u64) -> StampState {
        self.subjects.lock().unwrap()[&SubjectId(id)].state
    }

    /// Change state behind the engine's back
    pub(crate) fn force_state(&self, id: u64, state: StampState) {
        if let Some(s) = self.subjects.lock().unwrap().get_mut(&SubjectId(id)) {
            s.state = state;
        }
    }
}

#[async_trait]
impl VoteStore for MockStore {
    async fn votes_for(&self, subject: SubjectId) -> Result<Vec<Vote>, CollaboratorError> {
        if self.fail_votes.load(Ordering::SeqCst) {
            return Err(CollaboratorError::VoteStore("unreachable".to_string()));
        }
        Ok(self
            .votes
            .lock()
            .unwrap()
            .get(&subject)
            .cloned()
            .unwrap_or_default())
    }

    async fn accepted_siblings_of(
        &self,
        target: TargetId,
    ) -> Result<Vec<SubjectRef>, CollaboratorError> {
        let mut accepted: Vec<_> = self
            .subjects
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.target.id == target && s.state == StampState::Accepted)
            .map(|s| s.subject_ref())
            .collect();
        accepted.sort_by_key(|r| r.id);
        Ok(accepted)
    }
}

#[async_trait]
impl SubjectStore for MockStore {
    async fn load(&self, id: SubjectId) -> Result<Option<VoteSubject>, CollaboratorError> {
        Ok(self.subjects.lock().unwrap().get(&id).cloned())
    }

    async fn compare_and_transition(
        &self,
        id: SubjectId,
        from: StampState,
        to: StampState,
    ) -> Result<CasOutcome, CollaboratorError> {
        self.cas_calls.lock().unwrap().push((id, from, to));
        let mut subjects = self.subjects.lock().unwrap();
        let subject = subjects
            .get_mut(&id)
            .ok_or_else(|| CollaboratorError::SubjectStore(format!("no stamp {}", id)))?;
        if subject.state != from {
            return Ok(CasOutcome::Conflict(subject.state));
        }
        subject.state = to;
        Ok(CasOutcome::Applied)
    }

    async fn in_progress_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<SubjectRef>, CollaboratorError> {
        let mut due: Vec<_> = self
            .subjects
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.state == StampState::InProgress && s.created_at < cutoff)
            .map(|s| s.subject_ref())
            .collect();
        due.sort_by_key(|r| r.id);
        Ok(due)
    }
}

#[derive(Default)]
pub(crate) struct RecordingSinks {
    pub(crate) notifications: Mutex<Vec<Notification>>,
    pub(crate) activities: Mutex<Vec<Activity>>,
    pub(crate) fail_notifications: AtomicBool,
    pub(crate) fail_activities: AtomicBool,
    /// Fail only the n-th notify call (1-based), 0 for never
    pub(crate) fail_notify_call: AtomicUsize,
    notify_calls: AtomicUsize,
}

impl RecordingSinks {
    pub(crate) fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    pub(crate) fn activity_keys(&self) -> Vec<String> {
        self.activities
            .lock()
            .unwrap()
            .iter()
            .map(|a| a.key.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationSink for RecordingSinks {
    async fn notify(&self, notification: &Notification) -> Result<(), CollaboratorError> {
        let call = self.notify_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_notifications.load(Ordering::SeqCst)
            || self.fail_notify_call.load(Ordering::SeqCst) == call
        {
            return Err(CollaboratorError::NotificationSink("down".to_string()));
        }
        let mut notifications = self.notifications.lock().unwrap();
        if !notifications.iter().any(|n| n.id == notification.id) {
            notifications.push(notification.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl ActivitySink for RecordingSinks {
    async fn record(&self, activity: &Activity) -> Result<(), CollaboratorError> {
        if self.fail_activities.load(Ordering::SeqCst) {
            return Err(CollaboratorError::ActivitySink("down".to_string()));
        }
        let mut activities = self.activities.lock().unwrap();
        if !activities.iter().any(|a| a.id == activity.id) {
            activities.push(activity.clone());
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingQueue {
    pub(crate) submitted: Mutex<Vec<TaskEnvelope>>,
    pub(crate) fail: AtomicBool,
}

impl RecordingQueue {
    pub(crate) fn tasks(&self) -> Vec<TaskEnvelope> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskQueue for RecordingQueue {
    async fn submit(&self, task: TaskEnvelope) -> Result<(), CollaboratorError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollaboratorError::TaskQueue("closed".to_string()));
        }
        self.submitted.lock().unwrap().push(task);
        Ok(())
    }
}

/// Mocks plus the `EnginePorts` wired to them
pub(crate) struct Harness {
    pub(crate) store: Arc<MockStore>,
    pub(crate) sinks: Arc<RecordingSinks>,
    pub(crate) queue: Arc<RecordingQueue>,
}

impl Harness {
    pub(crate) fn new(subjects: Vec<VoteSubject>) -> Self {
        Self {
            store: Arc::new(MockStore::with_subjects(subjects)),
            sinks: Arc::new(RecordingSinks::default()),
            queue: Arc::new(RecordingQueue::default()),
        }
    }

    pub(crate) fn ports(&self) -> EnginePorts {
        EnginePorts {
            votes: self.store.clone(),
            subjects: self.store.clone(),
            notifications: self.sinks.clone(),
            activities: self.sinks.clone(),
            tasks: self.queue.clone(),
        }
    }
}
