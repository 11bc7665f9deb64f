//! Logging infrastructure: the JSONL activity audit log.
//!
//! Provides [`JsonlActivityLog`], a JSONL file writer that implements
//! the [`ActivitySink`](stamp_application::ActivitySink) port.

mod activity_log;

pub use activity_log::JsonlActivityLog;
