//! AI adapters - implementations of the completion client port.

mod mock;
mod openai;

pub use mock::{MockCompletionClient, MockFailure};
pub use openai::{OpenAiClient, OpenAiConfig};
