//! Records emitted by every successful transition
//!
//! Each transition produces exactly one [`Notification`] for the subject's
//! creator and one [`Activity`] for the activity feed. Both name the engine
//! itself as the actor.
//!
//! Both carry the id of the transition that produced them, built from the
//! subject, the event and the state it left. A retried transition yields the
//! same id, so sinks record it once.

use super::entities::{SubjectRef, TargetRef, VoteSubject};
use crate::core::ids::UserId;
use crate::lifecycle::{StampEvent, StampState};
use serde::{Deserialize, Serialize};

/// Who performed an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id")]
pub enum Actor {
    /// The engine, identified by the sentinel id
    System,
    User(UserId),
}

impl Actor {
    /// `owner_type` column of an activity
    pub fn owner_type(&self) -> &'static str {
        match self {
            Actor::System => "System",
            Actor::User(_) => "User",
        }
    }

    pub fn id(&self) -> UserId {
        match self {
            Actor::System => UserId::SYSTEM,
            Actor::User(id) => *id,
        }
    }
}

/// `"<subject-kind>.<event>"`
pub fn activity_key(subject: &SubjectRef, event: StampEvent) -> String {
    format!("{}.{}", subject.kind.param_key(), event.as_str())
}

/// `"<subject>:<event>:<from-state>"`, e.g. `stamp#3:deny:in_progress`
pub fn transition_id(subject: &SubjectRef, event: StampEvent, from: StampState) -> String {
    format!("{}:{}:{}", subject, event.as_str(), from.as_str())
}

/// A feed entry describing a transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Identity of the transition, see [`transition_id`]
    pub id: String,
    pub key: String,
    pub owner: Actor,
    /// The subject that transitioned
    pub trackable: SubjectRef,
    /// The target the subject belongs to, with its creator
    pub recipient: TargetRef,
}

impl Activity {
    /// `subject` is the record as loaded before the transition
    pub fn for_transition(subject: &VoteSubject, event: StampEvent) -> Self {
        let trackable = subject.subject_ref();
        Self {
            id: transition_id(&trackable, event, subject.state),
            key: activity_key(&trackable, event),
            owner: Actor::System,
            trackable,
            recipient: subject.target,
        }
    }
}

/// An unread message to a subject's creator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub recipient: UserId,
    pub actor: Actor,
    pub read: bool,
    pub activity_key: String,
    pub reference: SubjectRef,
}

impl Notification {
    pub fn for_transition(subject: &VoteSubject, event: StampEvent) -> Self {
        let reference = subject.subject_ref();
        Self {
            id: transition_id(&reference, event, subject.state),
            recipient: subject.creator,
            actor: Actor::System,
            read: false,
            activity_key: activity_key(&reference, event),
            reference,
        }
    }
}
