//! Deciding when a vote is over and what follows.
//!
//! - [`policy::ConclusionPolicy`]: the participation and agreement gates
//! - [`decision::Decision`]: accept, deny or dispute
//! - [`decision::SubjectEvaluation`]: tally, majority and decision from one snapshot

pub mod decision;
pub mod policy;

pub use decision::{Decision, SubjectEvaluation};
pub use policy::ConclusionPolicy;
