//! Scenario runs through the engine, the channel queue and the worker.

use crate::memory::{InMemoryActivitySink, InMemoryNotificationSink};
use crate::queue::{ChannelTaskQueue, TaskWorker};
use crate::scenario::{Scenario, SeededStores};
use chrono::{TimeZone, Utc};
use stamp_application::{EngineConfig, EnginePorts, ModerationEngine, SubjectStore};
use stamp_domain::{ConclusionPolicy, StampState, SubjectId, UserId};
use std::sync::Arc;

const SCENARIO: &str = r#"{
  "subjects": [
    { "id": 1, "creator": 101, "target": { "id": 10, "creator": 900 },
      "state": "accepted", "created_at": "2024-02-20T09:00:00Z" },
    { "id": 2, "creator": 102, "target": { "id": 10, "creator": 900 },
      "created_at": "2024-02-25T12:00:00Z" },
    { "id": 3, "creator": 103, "target": { "id": 11, "creator": 901 },
      "created_at": "2024-02-26T08:30:00Z" },
    { "id": 4, "creator": 104, "target": { "id": 12, "creator": 902 },
      "created_at": "2024-02-28T18:00:00Z" }
  ],
  "votes": [
    { "caster": 1, "subject": 2, "polarity": "up", "reputation": 100000 },
    { "caster": 2, "subject": 2, "polarity": "up", "reputation": 10000 },
    { "caster": 3, "subject": 2, "polarity": "up", "power": 2.0 },
    { "caster": 4, "subject": 2, "polarity": "down", "power": 1.0 },
    { "caster": 1, "subject": 3, "polarity": "down", "power": 6.0 },
    { "caster": 2, "subject": 3, "polarity": "down", "power": 5.0 },
    { "caster": 5, "subject": 3, "polarity": "up", "reputation": 10 },
    { "caster": 3, "subject": 4, "polarity": "up", "power": 3.0 },
    { "caster": 4, "subject": 4, "polarity": "down", "power": 2.0 }
  ]
}"#;

struct Runtime {
    engine: ModerationEngine,
    worker: TaskWorker,
    stores: SeededStores,
    notifications: Arc<InMemoryNotificationSink>,
    activities: Arc<InMemoryActivitySink>,
}

async fn runtime(config: EngineConfig) -> Runtime {
    let stores = Scenario::from_json(SCENARIO).unwrap().seed().await.unwrap();
    let notifications = Arc::new(InMemoryNotificationSink::new());
    let activities = Arc::new(InMemoryActivitySink::new());
    let (queue, task_rx) = ChannelTaskQueue::new();
    let engine = ModerationEngine::new(
        EnginePorts {
            votes: stores.votes.clone(),
            subjects: stores.subjects.clone(),
            notifications: notifications.clone(),
            activities: activities.clone(),
            tasks: Arc::new(queue),
        },
        config,
    );
    let worker = TaskWorker::new(task_rx, engine.task_handler());
    Runtime {
        engine,
        worker,
        stores,
        notifications,
        activities,
    }
}

async fn state(runtime: &Runtime, id: u64) -> StampState {
    runtime
        .stores
        .subjects
        .load(SubjectId(id))
        .await
        .unwrap()
        .unwrap()
        .state
}

#[tokio::test]
async fn test_conclude_scenario() {
    let mut rt = runtime(EngineConfig::new(ConclusionPolicy::new(10, 75))).await;

    for id in [2, 3, 4] {
        rt.engine.conclude(SubjectId(id)).await.unwrap();
    }
    // Dispatch alone changes nothing
    assert_eq!(state(&rt, 2).await, StampState::InProgress);

    let report = rt.worker.drain().await;
    assert_eq!(report.applied.len(), 3);

    assert_eq!(state(&rt, 1).await, StampState::Archived);
    assert_eq!(state(&rt, 2).await, StampState::Accepted);
    assert_eq!(state(&rt, 3).await, StampState::Denied);
    assert_eq!(state(&rt, 4).await, StampState::Disputed);

    let keys: Vec<_> = rt
        .activities
        .activities()
        .await
        .into_iter()
        .map(|a| a.key)
        .collect();
    assert_eq!(
        keys,
        vec!["stamp.archive", "stamp.accept", "stamp.deny", "stamp.dispute"]
    );

    let recipients: Vec<_> = rt
        .notifications
        .notifications()
        .await
        .into_iter()
        .map(|n| n.recipient)
        .collect();
    assert_eq!(
        recipients,
        vec![UserId(101), UserId(102), UserId(103), UserId(104)]
    );
}

#[tokio::test]
async fn test_repeated_conclusion_is_skipped() {
    let mut rt = runtime(EngineConfig::new(ConclusionPolicy::new(10, 75))).await;

    rt.engine.conclude(SubjectId(3)).await.unwrap();
    rt.engine.conclude(SubjectId(3)).await.unwrap();

    let report = rt.worker.drain().await;
    assert_eq!(report.applied.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(rt.notifications.notifications().await.len(), 1);
}

#[tokio::test]
async fn test_sweep_scenario() {
    let config = EngineConfig::new(ConclusionPolicy::new(10, 75)).with_conclude_after_hours(48);
    let mut rt = runtime(config).await;

    let now = Utc.with_ymd_and_hms(2024, 2, 28, 12, 0, 0).unwrap();
    let sweep = rt.engine.sweep(now).await.unwrap();

    // Created before 2024-02-26T12:00: stamps 2 and 3
    assert_eq!(sweep.due.len(), 2);
    rt.worker.drain().await;

    assert_eq!(state(&rt, 2).await, StampState::Accepted);
    assert_eq!(state(&rt, 3).await, StampState::Denied);
    assert_eq!(state(&rt, 4).await, StampState::InProgress);
}
