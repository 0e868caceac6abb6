//! Optional natural-language summaries for extracted function signatures.
//!
//! The extraction core only sees the [`CommentProvider`] trait; the real
//! OpenAI-backed implementation lives behind it so tests can substitute a
//! deterministic stub and transport failures stay a narrow, non-fatal
//! concern.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_COMPLETION_TOKENS: u32 = 256;
const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that describes code. Do not use // or any other identifier.";

#[derive(Debug, Clone, Error)]
pub enum SummaryError {
    #[error("summary request failed: {0}")]
    Transport(String),

    #[error("summary service returned status {0}")]
    Status(StatusCode),

    #[error("summary service returned no completion")]
    EmptyCompletion,
}

impl From<reqwest::Error> for SummaryError {
    fn from(err: reqwest::Error) -> Self {
        SummaryError::Transport(err.to_string())
    }
}

/// Produces a one-line description for a function signature.
pub trait CommentProvider {
    fn describe(&self, signature: &str) -> Result<String, SummaryError>;
}

/// Chat-completion backed provider.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str) -> Result<Self, SummaryError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the provider at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl CommentProvider for OpenAiProvider {
    fn describe(&self, signature: &str) -> Result<String, SummaryError> {
        let prompt =
            format!("Generate a descriptive comment for the following Go function:\n\n{signature}");
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: 0.5,
        };

        debug!(signature, model = %self.model, "requesting function summary");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummaryError::Status(status));
        }

        let body: ChatResponse = response.json()?;
        let comment = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(SummaryError::EmptyCompletion)?;

        Ok(comment)
    }
}
