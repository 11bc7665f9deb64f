//! Application-level configuration.
//!
//! - [`EngineConfig`]: conclusion thresholds, sweep age, collaborator timeout

pub mod engine_config;

pub use engine_config::EngineConfig;
