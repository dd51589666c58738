//! Session state machine.
//!
//! A session is either waiting for patient input, processing a turn, or
//! complete. `Complete` is terminal until an explicit reset.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The lifecycle state of a triage session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for the next patient message.
    #[default]
    AwaitingInput,

    /// A turn is in flight: the completion service has been invoked and the
    /// reply has not been folded into the session yet.
    Processing,

    /// A categorization was accepted; no further turns until reset.
    Complete,
}

impl SessionState {
    /// Returns true if a new patient message can be processed in this state.
    pub fn accepts_user_input(&self) -> bool {
        matches!(self, Self::AwaitingInput)
    }
}

impl StateMachine for SessionState {
    /// Reset is not a transition: it rebuilds the session at its initial
    /// values and is allowed from any state.
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionState::*;
        matches!(
            (self, target),
            // Patient message accepted, turn begins
            (AwaitingInput, Processing) |
            // Turn produced a clarifying reply, or no reply at all
            (Processing, AwaitingInput) |
            // Turn produced an accepted categorization
            (Processing, Complete)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionState::*;
        match self {
            AwaitingInput => vec![Processing],
            Processing => vec![AwaitingInput, Complete],
            Complete => vec![],
        }
    }
}
