//! Triage session - the mutable record of one conversation.
//!
//! The turn handler is the single writer; the presentation layer only reads.
//! Sessions are independent values, so concurrent sessions in one process
//! share no mutable state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{StateMachine, ValidationError};
use crate::domain::triage::{Categorization, Message, SessionState};

/// Unique identifier for a session, used for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random SessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One triage conversation: the history, the lifecycle state, and the
/// outcome once one is accepted.
///
/// # Invariants
///
/// - `outcome` is `Some` if and only if the state is `Complete`.
/// - Once complete, nothing but [`reset`](Self::reset) changes the session.
#[derive(Debug, Clone)]
pub struct TriageSession {
    id: SessionId,
    history: Vec<Message>,
    state: SessionState,
    outcome: Option<Categorization>,
}

impl TriageSession {
    /// Creates an empty session awaiting its first patient message.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            history: Vec::new(),
            state: SessionState::default(),
            outcome: None,
        }
    }

    /// Returns the session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the full conversation history, oldest first.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the accepted categorization, once the session is complete.
    pub fn outcome(&self) -> Option<&Categorization> {
        self.outcome.as_ref()
    }

    /// Returns true once a categorization has been accepted.
    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    /// Appends a message to the history.
    pub fn append(&mut self, message: Message) {
        self.history.push(message);
    }

    /// Moves the session to the target state, validating the transition.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the transition is not defined.
    pub fn transition(&mut self, target: SessionState) -> Result<(), ValidationError> {
        self.state = self.state.transition_to(target)?;
        Ok(())
    }

    /// Accepts a categorization and moves the session to its terminal state.
    ///
    /// The state change and the outcome assignment happen together, so the
    /// outcome can never be observed before `is_complete` is true.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the session is not mid-turn (e.g. already
    ///   complete).
    pub fn complete(&mut self, outcome: Categorization) -> Result<(), ValidationError> {
        self.state = self.state.transition_to(SessionState::Complete)?;
        self.outcome = Some(outcome);
        Ok(())
    }

    /// Clears the session back to its initial values, starting a new,
    /// unrelated conversation. Safe in any state; idempotent.
    pub fn reset(&mut self) {
        self.id = SessionId::new();
        self.history.clear();
        self.state = SessionState::default();
        self.outcome = None;
    }
}

impl Default for TriageSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::triage::Category;

    fn categorization() -> Categorization {
        Categorization::new(Category::PhysicianRequired, "ongoing chest pain").unwrap()
    }

    #[test]
    fn new_session_is_empty_and_awaiting_input() {
        let session = TriageSession::new();
        assert!(session.history().is_empty());
        assert_eq!(session.state(), SessionState::AwaitingInput);
        assert!(session.outcome().is_none());
        assert!(!session.is_complete());
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(TriageSession::new().id(), TriageSession::new().id());
    }

    #[test]
    fn append_grows_history_in_order() {
        let mut session = TriageSession::new();
        session.append(Message::user("I have a cough").unwrap());
        session.append(Message::assistant("Since when?").unwrap());
        assert_eq!(session.history().len(), 2);
        assert!(session.history()[0].is_user());
        assert!(session.history()[1].is_assistant());
    }

    #[test]
    fn complete_sets_outcome_and_terminal_state_together() {
        let mut session = TriageSession::new();
        session.transition(SessionState::Processing).unwrap();
        session.complete(categorization()).unwrap();

        assert!(session.is_complete());
        assert_eq!(
            session.outcome().unwrap().category(),
            Category::PhysicianRequired
        );
    }

    #[test]
    fn complete_is_rejected_outside_a_turn() {
        let mut session = TriageSession::new();
        assert!(session.complete(categorization()).is_err());
        assert!(session.outcome().is_none());
        assert!(!session.is_complete());
    }

    #[test]
    fn complete_cannot_happen_twice() {
        let mut session = TriageSession::new();
        session.transition(SessionState::Processing).unwrap();
        session.complete(categorization()).unwrap();

        let second = Categorization::new(Category::Administrative, "a form").unwrap();
        assert!(session.complete(second).is_err());
        // The original outcome is untouched.
        assert_eq!(
            session.outcome().unwrap().category(),
            Category::PhysicianRequired
        );
    }

    #[test]
    fn reset_restores_initial_values_from_any_state() {
        let mut session = TriageSession::new();
        session.append(Message::user("hello").unwrap());
        session.transition(SessionState::Processing).unwrap();
        session.complete(categorization()).unwrap();

        session.reset();

        assert!(session.history().is_empty());
        assert_eq!(session.state(), SessionState::AwaitingInput);
        assert!(session.outcome().is_none());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut session = TriageSession::new();
        session.reset();
        session.reset();
        assert!(session.history().is_empty());
        assert!(!session.is_complete());
    }

    #[test]
    fn reset_starts_an_unrelated_session() {
        let mut session = TriageSession::new();
        let before = session.id();
        session.reset();
        assert_ne!(session.id(), before);
    }
}
