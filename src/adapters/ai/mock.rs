//! Mock completion client for testing.
//!
//! Returns pre-configured replies in order and records every request, so
//! tests can drive full conversations without calling a real API.
//!
//! # Example
//!
//! ```ignore
//! let client = MockCompletionClient::new()
//!     .with_reply("How long have you had the symptom?")
//!     .with_reply(r#"{"category": 4, "reason": "persistent fever"}"#);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    CompletionClient, CompletionError, CompletionRequest, CompletionResponse, FinishReason,
};

/// A configured mock reply.
#[derive(Debug, Clone)]
enum MockReply {
    /// Return a successful completion with this content.
    Success(String),
    /// Return an error.
    Error(MockFailure),
}

/// Mock failure modes for testing error handling.
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// Simulate a network error.
    Network { message: String },
    /// Simulate a timeout.
    Timeout { timeout_secs: u32 },
    /// Simulate an authentication failure.
    AuthenticationFailed,
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate the service being down.
    Unavailable { message: String },
}

impl From<MockFailure> for CompletionError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::Network { message } => CompletionError::network(message),
            MockFailure::Timeout { timeout_secs } => CompletionError::Timeout { timeout_secs },
            MockFailure::AuthenticationFailed => CompletionError::AuthenticationFailed,
            MockFailure::RateLimited { retry_after_secs } => {
                CompletionError::rate_limited(retry_after_secs)
            }
            MockFailure::Unavailable { message } => CompletionError::unavailable(message),
        }
    }
}

/// Mock completion client.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionClient {
    /// Pre-configured replies (consumed in order).
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    /// Every request received, for verification.
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompletionClient {
    /// Creates a mock with no configured replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Success(content.into()));
        self
    }

    /// Queues a failure.
    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Error(failure));
        self
    }

    /// Returns how many requests were received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Returns the last request received, if any.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.requests.lock().unwrap().push(request);

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Success(content)) => Ok(CompletionResponse {
                content,
                model: "mock-model".to_string(),
                finish_reason: FinishReason::Stop,
            }),
            Some(MockReply::Error(failure)) => Err(failure.into()),
            None => Err(CompletionError::unavailable("mock: no replies configured")),
        }
    }
}
