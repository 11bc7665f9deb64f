//! Scenario fixtures
//!
//! A scenario is a JSON document describing subjects and the votes cast on
//! them. Loading one seeds the in-memory stores.
//!
//! ```json
//! {
//!   "subjects": [
//!     { "id": 1, "creator": 10, "target": { "id": 5, "creator": 20 },
//!       "created_at": "2024-01-01T00:00:00Z" }
//!   ],
//!   "votes": [
//!     { "caster": 30, "subject": 1, "polarity": "up", "power": 2.5 },
//!     { "caster": 31, "subject": 1, "polarity": "down", "reputation": 1000 }
//!   ]
//! }
//! ```
//!
//! A vote carries either an explicit `power` or a `reputation` the power is
//! derived from.

use crate::memory::{InMemorySubjectStore, InMemoryVoteStore};
use serde::{Deserialize, Serialize};
use stamp_domain::{Polarity, SubjectId, UserId, Vote, VotingPower, VoteSubject};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Could not read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Stamp {0} is defined more than once")]
    DuplicateSubject(SubjectId),

    #[error("Vote by user {caster} refers to unknown stamp {subject}")]
    UnknownSubject { caster: UserId, subject: SubjectId },

    #[error("Vote by user {caster} on stamp {subject} needs `power` or `reputation`")]
    MissingPower { caster: UserId, subject: SubjectId },
}

/// A vote as written in a scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioVote {
    pub caster: UserId,
    pub subject: SubjectId,
    pub polarity: Polarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation: Option<i64>,
}

impl ScenarioVote {
    fn to_vote(&self) -> Result<Vote, ScenarioError> {
        let power = match (self.power, self.reputation) {
            (Some(power), _) => VotingPower(power),
            (None, Some(reputation)) => VotingPower::from_reputation(reputation),
            (None, None) => {
                return Err(ScenarioError::MissingPower {
                    caster: self.caster,
                    subject: self.subject,
                });
            }
        };
        Ok(Vote::new(self.caster, self.subject, self.polarity, power))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub subjects: Vec<VoteSubject>,
    #[serde(default)]
    pub votes: Vec<ScenarioVote>,
}

/// Stores seeded from a scenario
pub struct SeededStores {
    pub subjects: Arc<InMemorySubjectStore>,
    pub votes: Arc<InMemoryVoteStore>,
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        let mut ids = HashSet::new();
        for subject in &self.subjects {
            if !ids.insert(subject.id) {
                return Err(ScenarioError::DuplicateSubject(subject.id));
            }
        }
        for vote in &self.votes {
            if !ids.contains(&vote.subject) {
                return Err(ScenarioError::UnknownSubject {
                    caster: vote.caster,
                    subject: vote.subject,
                });
            }
            vote.to_vote()?;
        }
        Ok(())
    }

    /// Subject ids in file order
    pub fn subject_ids(&self) -> Vec<SubjectId> {
        self.subjects.iter().map(|s| s.id).collect()
    }

    /// Build in-memory stores holding this scenario's data
    pub async fn seed(&self) -> Result<SeededStores, ScenarioError> {
        let subjects = Arc::new(InMemorySubjectStore::new());
        for subject in &self.subjects {
            subjects.insert(subject.clone()).await;
        }

        let votes = Arc::new(InMemoryVoteStore::new(subjects.clone()));
        for vote in &self.votes {
            votes.cast(vote.to_vote()?).await;
        }

        Ok(SeededStores { subjects, votes })
    }
}
