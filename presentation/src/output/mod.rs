//! Output formatting for engine results

pub mod console;
pub mod formatter;
pub mod report;
