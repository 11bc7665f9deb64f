//! Stamp lifecycle transition table
//!
//! ```text
//! event    from          to
//! ───────  ────────────  ─────────
//! accept   in_progress → accepted   (+ archive accepted siblings)
//! deny     in_progress → denied
//! dispute  in_progress → disputed
//! archive  accepted    → archived
//! ```
//!
//! The table is pure. Applying a transition against stored state, and the
//! notification/activity emitted with it, belong to the application layer.

use super::event::StampEvent;
use super::state::StampState;
use crate::core::error::GuardViolation;

/// The only state an event may be applied from
pub fn source_state(event: StampEvent) -> StampState {
    match event {
        StampEvent::Accept | StampEvent::Deny | StampEvent::Dispute => StampState::InProgress,
        StampEvent::Archive => StampState::Accepted,
    }
}

/// The state an event leads to
pub fn target_state(event: StampEvent) -> StampState {
    match event {
        StampEvent::Accept => StampState::Accepted,
        StampEvent::Deny => StampState::Denied,
        StampEvent::Dispute => StampState::Disputed,
        StampEvent::Archive => StampState::Archived,
    }
}

/// Look up `(state, event)` in the table
///
/// # Example
///
/// ```
/// use stamp_domain::lifecycle::transition;
/// use stamp_domain::{StampEvent, StampState};
///
/// assert_eq!(
///     transition(StampState::InProgress, StampEvent::Accept),
///     Ok(StampState::Accepted)
/// );
/// assert!(transition(StampState::InProgress, StampEvent::Archive).is_err());
/// ```
pub fn transition(state: StampState, event: StampEvent) -> Result<StampState, GuardViolation> {
    if state == source_state(event) {
        Ok(target_state(event))
    } else {
        Err(GuardViolation { event, state })
    }
}

/// A checked `(from, to)` pair for one event
///
/// Carried into the state store's compare-and-swap so the store only sees
/// pairs that exist in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub event: StampEvent,
    pub from: StampState,
    pub to: StampState,
}

impl Transition {
    /// Plan `event` against an observed state
    pub fn plan(observed: StampState, event: StampEvent) -> Result<Self, GuardViolation> {
        let to = transition(observed, event)?;
        Ok(Self {
            event,
            from: observed,
            to,
        })
    }

    /// The pair that undoes this transition
    pub fn reversed(&self) -> (StampState, StampState) {
        (self.to, self.from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert_eq!(
            transition(StampState::InProgress, StampEvent::Accept),
            Ok(StampState::Accepted)
        );
        assert_eq!(
            transition(StampState::InProgress, StampEvent::Deny),
            Ok(StampState::Denied)
        );
        assert_eq!(
            transition(StampState::InProgress, StampEvent::Dispute),
            Ok(StampState::Disputed)
        );
        assert_eq!(
            transition(StampState::Accepted, StampEvent::Archive),
            Ok(StampState::Archived)
        );
    }

    #[test]
    fn test_exactly_four_transitions_exist() {
        let mut valid = 0;
        for state in StampState::ALL {
            for event in StampEvent::ALL {
                match transition(state, event) {
                    Ok(_) => valid += 1,
                    Err(violation) => {
                        assert_eq!(violation.event, event);
                        assert_eq!(violation.state, state);
                    }
                }
            }
        }
        assert_eq!(valid, 4);
    }

    #[test]
    fn test_archive_from_in_progress_is_rejected() {
        let err = transition(StampState::InProgress, StampEvent::Archive).unwrap_err();
        assert_eq!(err.state, StampState::InProgress);
        assert_eq!(err.event, StampEvent::Archive);
    }

    #[test]
    fn test_concluded_never_returns_to_in_progress() {
        for state in StampState::ALL.into_iter().filter(|s| s.is_concluded()) {
            for event in StampEvent::ALL {
                if let Ok(next) = transition(state, event) {
                    assert_ne!(next, StampState::InProgress);
                }
            }
        }
    }

    #[test]
    fn test_archived_is_terminal() {
        for event in StampEvent::ALL {
            assert!(transition(StampState::Archived, event).is_err());
        }
    }

    #[test]
    fn test_plan_and_reverse() {
        let planned = Transition::plan(StampState::Accepted, StampEvent::Archive).unwrap();
        assert_eq!(planned.from, StampState::Accepted);
        assert_eq!(planned.to, StampState::Archived);
        assert_eq!(
            planned.reversed(),
            (StampState::Archived, StampState::Accepted)
        );
        assert!(Transition::plan(StampState::Denied, StampEvent::Deny).is_err());
    }
}
