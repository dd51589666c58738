//! Ports - interfaces between the dialogue logic and the outside world.
//!
//! Adapters implement these; the application layer only sees the traits.

mod completion;

pub use completion::{
    CompletionClient, CompletionError, CompletionRequest, CompletionResponse, FinishReason,
    Message, MessageRole,
};
