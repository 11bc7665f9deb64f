//! In-memory adapters for every engine port except the task queue.
//!
//! Used by the CLI to run scenarios and by end-to-end tests.

mod sinks;
mod stores;

pub use sinks::{InMemoryActivitySink, InMemoryNotificationSink};
pub use stores::{InMemorySubjectStore, InMemoryVoteStore};
