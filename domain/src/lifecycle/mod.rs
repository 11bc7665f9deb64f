//! Vote subject lifecycle
//!
//! ```text
//!                  ┌── accept ──▶ accepted ── archive ──▶ archived
//!   in_progress ───┼── deny ────▶ denied
//!                  └── dispute ─▶ disputed
//! ```

pub mod event;
pub mod state;
pub mod transition;

pub use event::StampEvent;
pub use state::StampState;
pub use transition::{Transition, source_state, target_state, transition};
