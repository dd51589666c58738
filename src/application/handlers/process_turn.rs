//! ProcessTurn command handler - the dialogue-turn controller.
//!
//! One turn: append the patient's message to the history, ask the completion
//! service for a reply over the full history, and decide from the reply
//! whether the session is complete or the conversation continues.
//!
//! The handler is the sole writer of the session it is handed. A failed
//! completion call folds nothing into the history, so the session stays
//! resumable on the next input.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::domain::foundation::ValidationError;
use crate::domain::triage::{
    extract_categorization, Categorization, Message, Role, SessionState, TriageSession,
};
use crate::ports::{CompletionClient, CompletionError, CompletionRequest, MessageRole};

/// Default bound on reply length, in tokens.
pub const DEFAULT_MAX_REPLY_TOKENS: u32 = 500;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Command to process one patient message.
#[derive(Debug, Clone)]
pub struct ProcessTurnCommand {
    /// The raw patient input for this turn.
    pub content: String,
}

impl ProcessTurnCommand {
    /// Creates a new process turn command.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Errors that can occur while processing a turn.
#[derive(Debug, Error)]
pub enum ProcessTurnError {
    /// Input was empty or whitespace only.
    #[error("Validation error: message content cannot be empty")]
    EmptyContent,

    /// The session already has an accepted categorization.
    #[error("Session is complete; reset it to start a new conversation")]
    SessionComplete,

    /// The completion service failed; the turn produced nothing.
    #[error("Completion service error: {0}")]
    Completion(#[from] CompletionError),

    /// Domain invariant violation.
    #[error("Domain error: {0}")]
    Domain(#[from] ValidationError),
}

/// Result of a processed turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The model asked a clarifying question; the conversation continues.
    Continued {
        /// The assistant reply that was appended to the history.
        reply: String,
    },
    /// A categorization was accepted; the session is complete.
    Completed(Categorization),
}

/// Handler for ProcessTurn commands.
///
/// Holds the fixed system instruction (loaded once at startup) and the
/// generation parameters sent with every completion call.
pub struct ProcessTurnHandler<C: CompletionClient> {
    completion: Arc<C>,
    system_prompt: String,
    max_reply_tokens: u32,
    temperature: f32,
}

impl<C: CompletionClient> ProcessTurnHandler<C> {
    /// Creates a handler with default generation parameters.
    pub fn new(completion: Arc<C>, system_prompt: impl Into<String>) -> Self {
        Self {
            completion,
            system_prompt: system_prompt.into(),
            max_reply_tokens: DEFAULT_MAX_REPLY_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Overrides the generation parameters.
    pub fn with_generation(mut self, max_reply_tokens: u32, temperature: f32) -> Self {
        self.max_reply_tokens = max_reply_tokens;
        self.temperature = temperature;
        self
    }

    /// Processes one turn against the given session.
    ///
    /// # Errors
    ///
    /// - `EmptyContent` if the input is blank; the session is untouched.
    /// - `SessionComplete` if a categorization was already accepted; the
    ///   session is untouched.
    /// - `Completion` if the service call failed; the patient message stays
    ///   in the history, no assistant message is appended, and the session
    ///   returns to awaiting input so the patient can resubmit.
    #[tracing::instrument(skip_all, fields(session = %session.id()))]
    pub async fn handle(
        &self,
        session: &mut TriageSession,
        cmd: ProcessTurnCommand,
    ) -> Result<TurnOutcome, ProcessTurnError> {
        let content = cmd.content.trim();
        if content.is_empty() {
            return Err(ProcessTurnError::EmptyContent);
        }
        if session.is_complete() {
            return Err(ProcessTurnError::SessionComplete);
        }

        session.append(Message::user(content)?);
        session.transition(SessionState::Processing)?;

        let request = self.build_request(session);
        let response = match self.completion.complete(request).await {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "completion call failed; turn produced nothing");
                session.transition(SessionState::AwaitingInput)?;
                return Err(err.into());
            }
        };

        match extract_categorization(&response.content) {
            Some(draft) => match draft.into_categorization() {
                Ok(categorization) => {
                    // Terminal: the raw reply is not part of the transcript.
                    info!(category = categorization.category().code(), "categorization accepted");
                    session.complete(categorization.clone())?;
                    Ok(TurnOutcome::Completed(categorization))
                }
                Err(_) => {
                    // Category was valid but the rationale is missing; keep
                    // the conversation going rather than accept a partial
                    // result.
                    debug!("categorization missing rationale; continuing conversation");
                    self.continue_with(session, response.content)
                }
            },
            None => {
                debug!("no categorization in reply; continuing conversation");
                self.continue_with(session, response.content)
            }
        }
    }

    /// Folds a clarifying reply into the session.
    fn continue_with(
        &self,
        session: &mut TriageSession,
        reply: String,
    ) -> Result<TurnOutcome, ProcessTurnError> {
        session.append(Message::assistant(reply.clone())?);
        session.transition(SessionState::AwaitingInput)?;
        Ok(TurnOutcome::Continued { reply })
    }

    /// Builds the completion request from the session history.
    fn build_request(&self, session: &TriageSession) -> CompletionRequest {
        let mut request = CompletionRequest::new()
            .with_system_prompt(&self.system_prompt)
            .with_max_tokens(self.max_reply_tokens)
            .with_temperature(self.temperature);

        for message in session.history() {
            let role = match message.role() {
                Role::System => MessageRole::System,
                Role::User => MessageRole::User,
                Role::Assistant => MessageRole::Assistant,
            };
            request = request.with_message(role, message.content());
        }

        request
    }
}
