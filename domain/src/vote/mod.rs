//! Weighted voting domain
//!
//! - [`entities`]: [`Vote`], [`Polarity`], [`VotingPower`]
//! - [`tally`]: [`VoteTally`], the power snapshot of one subject
//! - [`majority`]: [`Majority`] size and type derived from a tally

pub mod entities;
pub mod majority;
pub mod tally;

pub use entities::{Polarity, Vote, VotingPower};
pub use majority::{Majority, MajorityType, majority_size};
pub use tally::VoteTally;
