//! Chat-completion client for OpenAI-compatible APIs.
//!
//! Wraps `reqwest` with typed request/response structs, API key management,
//! and a narrow [`CompletionClient`] trait so callers (and tests) depend on
//! "one prompt in, one text out" rather than on the wire format.

mod client;
mod error;
mod types;

use async_trait::async_trait;

pub use client::OpenAiClient;
pub use error::LlmError;
pub use types::{ChatMessage, ChatRequest, ChatResponse};

/// A single request/response exchange with a text-generation endpoint.
///
/// The only capability the summarization pipeline consumes. Implemented by
/// [`OpenAiClient`] in production and by recording mocks in tests.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issue one completion call and return the response text.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] on transport failure, a non-2xx status, an
    /// API-level error payload, or an empty/malformed response body.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, LlmError>;
}
