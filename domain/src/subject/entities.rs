//! Vote subjects and the targets they compete over

use crate::core::ids::{SubjectId, TargetId, UserId};
use crate::lifecycle::StampState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of record that can be voted on
///
/// Every kind shares the same tally, policy and lifecycle; the kind only
/// names the record in activity keys and task payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    /// A proposed moderation label on an item
    #[default]
    Stamp,
}

impl SubjectKind {
    /// Prefix used in activity keys (`stamp.accept`)
    pub fn param_key(&self) -> &'static str {
        match self {
            SubjectKind::Stamp => "stamp",
        }
    }
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.param_key())
    }
}

/// Kind-qualified reference to a vote subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectRef {
    pub kind: SubjectKind,
    pub id: SubjectId,
}

impl SubjectRef {
    pub fn new(kind: SubjectKind, id: SubjectId) -> Self {
        Self { kind, id }
    }

    pub fn stamp(id: SubjectId) -> Self {
        Self::new(SubjectKind::Stamp, id)
    }
}

impl std::fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

/// The votable item a subject is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub id: TargetId,
    /// Owner of the target
    pub creator: UserId,
}

/// A stateful proposal under vote
///
/// Subjects sharing a `target` form a sibling set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteSubject {
    pub id: SubjectId,
    #[serde(default)]
    pub kind: SubjectKind,
    /// Who proposed this subject
    pub creator: UserId,
    pub target: TargetRef,
    #[serde(default)]
    pub state: StampState,
    pub created_at: DateTime<Utc>,
}

impl VoteSubject {
    /// Create a subject in the initial `in_progress` state
    pub fn new(
        id: SubjectId,
        creator: UserId,
        target: TargetRef,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind: SubjectKind::Stamp,
            creator,
            target,
            state: StampState::InProgress,
            created_at,
        }
    }

    pub fn with_state(mut self, state: StampState) -> Self {
        self.state = state;
        self
    }

    pub fn subject_ref(&self) -> SubjectRef {
        SubjectRef::new(self.kind, self.id)
    }

    /// Whether `other` competes over the same target
    pub fn is_sibling_of(&self, other: &VoteSubject) -> bool {
        self.id != other.id && self.target.id == other.target.id
    }
}
