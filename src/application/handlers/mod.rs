//! Command handlers.

mod process_turn;

pub use process_turn::{
    ProcessTurnCommand, ProcessTurnError, ProcessTurnHandler, TurnOutcome,
    DEFAULT_MAX_REPLY_TOKENS, DEFAULT_TEMPERATURE,
};
