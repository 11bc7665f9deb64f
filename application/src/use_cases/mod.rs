//! Use cases
//!
//! Application-level operations that orchestrate domain logic.
//!
//! | Use case | Changes state? |
//! |----------|----------------|
//! | [`evaluate_subject`] | no |
//! | [`conclude_subject`] | no, submits one task |
//! | [`transition_subject`] | yes |
//! | [`handle_task`] | yes, through transitions |
//! | [`sweep`] | no, concludes due subjects |

pub mod conclude_subject;
pub mod engine;
pub mod evaluate_subject;
pub mod handle_task;
pub(crate) mod shared;
pub mod sweep;
#[cfg(test)]
pub(crate) mod test_support;
pub mod transition_subject;
