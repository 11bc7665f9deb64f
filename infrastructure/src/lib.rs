//! Infrastructure layer for stamp-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod memory;
pub mod queue;
pub mod scenario;

#[cfg(test)]
mod end_to_end;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, FileConfig, FileEngineConfig, FileSweepConfig,
    FileThresholdsConfig, Severity,
};
pub use logging::JsonlActivityLog;
pub use memory::{
    InMemoryActivitySink, InMemoryNotificationSink, InMemorySubjectStore, InMemoryVoteStore,
};
pub use queue::{ChannelTaskQueue, TaskWorker, WorkerReport};
pub use scenario::{Scenario, ScenarioError, ScenarioVote, SeededStores};
