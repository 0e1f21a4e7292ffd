//! Attendant terminal state machine.
//!
//! A terminal runs one operation at a time. The state machine is what turns
//! that rule into an error instead of a double registration when the operator
//! taps twice.
//!
//! # States
//!
//! - `Ready`: waiting for the operator
//! - `Busy`: a registration, lookup or confirmation is in flight
//! - `Confirming`: a paid vehicle was found and waits for exit confirmation
//!
//! # Valid Transitions
//!
//! - Ready → Busy → Ready
//! - Busy → Confirming → Busy (confirm) → Ready, or back to Confirming on failure
//! - Confirming → Ready (cancel)
//!
//! # Examples
//!
//! ```
//! use parkgate_attendant::{AttendantState, StateMachine};
//!
//! let mut machine = StateMachine::new();
//! assert_eq!(machine.current_state(), AttendantState::Ready);
//!
//! machine.transition_to(AttendantState::Busy).unwrap();
//! assert!(machine.transition_to(AttendantState::Busy).is_err());
//! ```

use std::fmt;

use parkgate_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Phase of the attendant terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendantState {
    /// Waiting for the operator.
    #[default]
    Ready,

    /// An operation is in flight; new actions are rejected.
    Busy,

    /// A paid vehicle is on screen awaiting confirm or cancel.
    Confirming,
}

impl fmt::Display for AttendantState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            AttendantState::Ready => "Ready",
            AttendantState::Busy => "Busy",
            AttendantState::Confirming => "Confirming",
        };
        write!(f, "{}", state_str)
    }
}

impl AttendantState {
    /// Check if transition to `target` is allowed from this state.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkgate_attendant::AttendantState;
    ///
    /// assert!(AttendantState::Ready.can_transition_to(&AttendantState::Busy));
    /// assert!(!AttendantState::Ready.can_transition_to(&AttendantState::Confirming));
    /// ```
    pub fn can_transition_to(&self, target: &AttendantState) -> bool {
        matches!(
            (self, target),
            (AttendantState::Ready, AttendantState::Busy)
                | (
                    AttendantState::Busy,
                    AttendantState::Ready | AttendantState::Confirming
                )
                | (
                    AttendantState::Confirming,
                    AttendantState::Busy | AttendantState::Ready
                )
        )
    }

    /// Whether the terminal accepts a new operation.
    pub fn accepts_actions(&self) -> bool {
        *self == AttendantState::Ready
    }
}

/// A state change that took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    pub from: AttendantState,
    pub to: AttendantState,
}

/// State machine guarding the attendant terminal.
///
/// Not thread-safe; the attendant owns it and takes `&mut self` for every
/// operation.
#[derive(Debug)]
pub struct StateMachine {
    current_state: AttendantState,
}

impl StateMachine {
    /// Create a state machine in the `Ready` state.
    pub fn new() -> Self {
        Self {
            current_state: AttendantState::Ready,
        }
    }

    pub fn current_state(&self) -> AttendantState {
        self.current_state
    }

    /// Transition to `new_state`, validating the move.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` if the move is not allowed from
    /// the current state. The state is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkgate_attendant::{AttendantState, StateMachine};
    ///
    /// let mut machine = StateMachine::new();
    /// let transition = machine.transition_to(AttendantState::Busy).unwrap();
    /// assert_eq!(transition.from, AttendantState::Ready);
    ///
    /// assert!(machine.transition_to(AttendantState::Busy).is_err());
    /// ```
    pub fn transition_to(&mut self, new_state: AttendantState) -> Result<StateTransition> {
        if !self.current_state.can_transition_to(&new_state) {
            return Err(Error::InvalidStateTransition {
                from: self.current_state.to_string(),
                to: new_state.to_string(),
            });
        }

        Ok(self.change_to(new_state))
    }

    /// Force the machine back to `Ready` (error recovery).
    pub fn reset(&mut self) -> StateTransition {
        self.change_to(AttendantState::Ready)
    }

    fn change_to(&mut self, new_state: AttendantState) -> StateTransition {
        let transition = StateTransition {
            from: self.current_state,
            to: new_state,
        };
        debug!(from = %transition.from, to = %transition.to, "attendant state change");
        self.current_state = new_state;
        transition
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_machine_starts_ready() {
        let machine = StateMachine::new();
        assert_eq!(machine.current_state(), AttendantState::Ready);
        assert!(machine.current_state().accepts_actions());
    }

    #[rstest]
    #[case(AttendantState::Ready, AttendantState::Busy, true)]
    #[case(AttendantState::Busy, AttendantState::Ready, true)]
    #[case(AttendantState::Busy, AttendantState::Confirming, true)]
    #[case(AttendantState::Confirming, AttendantState::Busy, true)]
    #[case(AttendantState::Confirming, AttendantState::Ready, true)]
    #[case(AttendantState::Ready, AttendantState::Confirming, false)]
    #[case(AttendantState::Ready, AttendantState::Ready, false)]
    #[case(AttendantState::Busy, AttendantState::Busy, false)]
    #[case(AttendantState::Confirming, AttendantState::Confirming, false)]
    fn test_transition_rules(
        #[case] from: AttendantState,
        #[case] to: AttendantState,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(&to), allowed);
    }

    #[test]
    fn test_exit_flow() {
        let mut machine = StateMachine::new();
        machine.transition_to(AttendantState::Busy).unwrap();
        machine.transition_to(AttendantState::Confirming).unwrap();
        machine.transition_to(AttendantState::Busy).unwrap();
        machine.transition_to(AttendantState::Confirming).unwrap();
        let last = machine.transition_to(AttendantState::Ready).unwrap();

        assert_eq!(
            last,
            StateTransition {
                from: AttendantState::Confirming,
                to: AttendantState::Ready,
            }
        );
        assert_eq!(machine.current_state(), AttendantState::Ready);
    }

    #[test]
    fn test_invalid_transition_keeps_state() {
        let mut machine = StateMachine::new();
        machine.transition_to(AttendantState::Busy).unwrap();

        let err = machine.transition_to(AttendantState::Busy).unwrap_err();
        assert!(matches!(err, Error::InvalidStateTransition { .. }));
        assert_eq!(err.to_string(), "Invalid state transition from Busy to Busy");
        assert_eq!(machine.current_state(), AttendantState::Busy);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut machine = StateMachine::new();
        machine.transition_to(AttendantState::Busy).unwrap();
        machine.transition_to(AttendantState::Confirming).unwrap();

        let transition = machine.reset();
        assert_eq!(transition.from, AttendantState::Confirming);
        assert_eq!(machine.current_state(), AttendantState::Ready);
    }

    #[test]
    fn test_state_serialization() {
        assert_eq!(AttendantState::Confirming.to_string(), "Confirming");
        assert_eq!(AttendantState::default(), AttendantState::Ready);
    }
}
