//! Domain layer for stamp-quorum
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Stamps
//!
//! A stamp is a proposed moderation outcome on a votable target. Users cast
//! weighted votes on it; once the vote is decisive the stamp is accepted or
//! denied, otherwise it is disputed. Stamps on the same target are siblings,
//! and at most one of them may be accepted at a time.
//!
//! ## Pipeline
//!
//! ```text
//! votes ──▶ VoteTally ──▶ Majority ──▶ ConclusionPolicy ──▶ Decision
//!                                                             │
//!                          accept / deny / dispute / archive ◀┘
//!                          (lifecycle transition table)
//! ```

pub mod conclusion;
pub mod core;
pub mod lifecycle;
pub mod subject;
pub mod vote;

// Re-export commonly used types
pub use conclusion::{ConclusionPolicy, Decision, SubjectEvaluation};
pub use core::{
    error::{DomainError, GuardViolation},
    ids::{SubjectId, TargetId, UserId},
};
pub use lifecycle::{StampEvent, StampState, Transition};
pub use subject::{
    Activity, Actor, Notification, SubjectKind, SubjectRef, TargetRef, VoteSubject, activity_key,
    transition_id,
};
pub use vote::{Majority, MajorityType, Polarity, Vote, VoteTally, VotingPower, majority_size};
