//! OpenAI-compatible chat-completion client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::LlmConfig;

/// Error from a completion call
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The HTTP request itself failed (connection, TLS, timeout)
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("completion API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The API answered 2xx but returned no usable choice
    #[error("completion API returned no choices")]
    EmptyResponse,
}

/// A source of chat completions
///
/// The executor depends on this trait rather than a concrete client so tests
/// can substitute scripted backends.
#[async_trait]
pub trait Completion: Send + Sync + 'static {
    /// Issue one completion request for the given user prompt and return the
    /// model's text reply
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Chat message in the completion API request
#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Chat completion request body
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

/// Chat completion response body
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

/// Response choice
#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

/// Message inside a response choice
#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for a hosted OpenAI-compatible completion endpoint
///
/// Holds an immutable [`LlmConfig`] and a shared reqwest client; safe to share
/// across concurrent turns.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl CompletionClient {
    /// Create a new completion client
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// The configured model identifier
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the API URL for chat completions
    fn api_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Build a request body for the given user prompt
    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.config.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

#[async_trait]
impl Completion for CompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = self.build_request(prompt);

        tracing::debug!(model = %self.config.model, "sending completion request");

        let response = self
            .client
            .post(self.api_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}
