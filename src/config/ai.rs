//! Completion provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::{ConfigError, ValidationError};

/// Completion provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Model to use for triage completions
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for the completion API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Bound on reply length, in tokens
    #[serde(default = "default_max_reply_tokens")]
    pub max_reply_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Path to the system prompt file, read once at startup
    #[serde(default = "default_system_prompt_path")]
    pub system_prompt_path: String,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Reads the system prompt file.
    ///
    /// The prompt encodes the triage policy and the structured-output
    /// contract; a missing or empty file is a startup failure, never a
    /// per-turn one.
    pub fn load_system_prompt(&self) -> Result<String, ConfigError> {
        let content = std::fs::read_to_string(&self.system_prompt_path).map_err(|source| {
            ConfigError::SystemPromptUnreadable {
                path: self.system_prompt_path.clone(),
                source,
            }
        })?;

        if content.trim().is_empty() {
            return Err(ValidationError::EmptySystemPrompt.into());
        }
        Ok(content)
    }

    /// Validate completion provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired(
                "CLINIC_TRIAGE__AI__OPENAI_API_KEY",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_reply_tokens == 0 {
            return Err(ValidationError::InvalidMaxReplyTokens);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            max_reply_tokens: default_max_reply_tokens(),
            temperature: default_temperature(),
            system_prompt_path: default_system_prompt_path(),
        }
    }
}

fn default_model() -> String {
    "gpt-4.1".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}

fn default_max_reply_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_system_prompt_path() -> String {
    "triage_system_prompt.txt".to_string()
}
