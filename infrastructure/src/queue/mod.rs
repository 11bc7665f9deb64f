//! In-process task queue
//!
//! [`ChannelTaskQueue`] implements the `TaskQueue` port over a tokio channel;
//! [`TaskWorker`] drains it through the task handler.

mod channel;
mod worker;

pub use channel::ChannelTaskQueue;
pub use worker::{TaskWorker, WorkerReport};
