//! HTTP client for OpenAI-compatible chat-completion APIs.
//!
//! Wraps `reqwest` with API key management and typed deserialization. Error
//! payloads returned by the API (`{"error": {"message": ...}}`) are surfaced
//! as [`LlmError::ApiError`] with the upstream message preserved.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::LlmError;
use crate::types::{ApiErrorEnvelope, ChatMessage, ChatRequest, ChatResponse};
use crate::CompletionClient;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for an OpenAI-compatible `chat/completions` endpoint.
///
/// Use [`OpenAiClient::new`] for production or [`OpenAiClient::with_base_url`]
/// to point at a mock server in tests (or a local deployment).
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    model: String,
}

impl OpenAiClient {
    /// Creates a new client pointed at the production OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock,
    /// or OpenAI-compatible local deployments).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`LlmError::ApiError`] if `base_url` is not a valid
    /// URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("stockbrief/0.1 (news-summarizer)")
            .build()?;

        // Normalise: exactly one trailing slash so join() appends rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| LlmError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            model: model.to_owned(),
        })
    }

    fn completions_url(&self) -> Result<Url, LlmError> {
        self.base_url
            .join("chat/completions")
            .map_err(|e| LlmError::ApiError(format!("invalid completions URL: {e}")))
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_prompt),
            ],
            max_tokens,
            temperature,
        };

        let url = self.completions_url()?;
        tracing::debug!(model = %self.model, max_tokens, "issuing completion request");

        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Prefer the API's own message when the body carries one.
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(LlmError::ApiError(format!(
                "completion request failed with status {status}: {message}"
            )));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?
            .message
            .content;

        Ok(text.trim().to_string())
    }
}
