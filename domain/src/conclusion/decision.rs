//! Conclusion outcomes and evaluation snapshots

use super::policy::ConclusionPolicy;
use crate::lifecycle::StampEvent;
use crate::subject::SubjectRef;
use crate::vote::{Majority, VoteTally};
use serde::{Deserialize, Serialize};

/// Follow-up chosen for a subject when it is concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Deny,
    Dispute,
}

impl Decision {
    /// The lifecycle event this decision leads to
    pub fn event(&self) -> StampEvent {
        match self {
            Decision::Accept => StampEvent::Accept,
            Decision::Deny => StampEvent::Deny,
            Decision::Dispute => StampEvent::Dispute,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.event().as_str()
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything derived from one vote snapshot of a subject
///
/// # Example
///
/// ```
/// use stamp_domain::{ConclusionPolicy, Decision, SubjectEvaluation, SubjectId, SubjectRef, VoteTally};
///
/// let tally = VoteTally::from_powers(140.0, 60.0).unwrap();
/// let eval = SubjectEvaluation::new(SubjectRef::stamp(SubjectId(1)), tally, &ConclusionPolicy::new(10, 75));
/// assert_eq!(eval.majority.size, 70);
/// assert!(!eval.concludable);
/// assert_eq!(eval.decision, Decision::Dispute);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectEvaluation {
    pub subject: SubjectRef,
    pub tally: VoteTally,
    pub majority: Majority,
    pub concludable: bool,
    pub decision: Decision,
}

impl SubjectEvaluation {
    pub fn new(subject: SubjectRef, tally: VoteTally, policy: &ConclusionPolicy) -> Self {
        Self {
            subject,
            tally,
            majority: tally.majority(),
            concludable: policy.is_concludable(&tally),
            decision: policy.decide(&tally),
        }
    }

    pub fn total_power(&self) -> f64 {
        self.tally.total_power()
    }
}
