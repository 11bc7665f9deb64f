//! Vote subjects, their targets, and the records a transition emits.

pub mod emission;
pub mod entities;

pub use emission::{Activity, Actor, Notification, activity_key, transition_id};
pub use entities::{SubjectKind, SubjectRef, TargetRef, VoteSubject};
