//! Batch summarization over a chat-completion client.
//!
//! Two modes: the default two-stage pass analyzes each article on its own
//! and then synthesizes one paragraph from the collected analyses; the
//! single-stage pass sends every article in one prompt. Per-article analysis
//! failures are absorbed, a failed synthesis call is fatal.

use std::sync::Arc;

use stockbrief_core::SummaryMode;
use stockbrief_llm::CompletionClient;

use crate::error::NewsError;
use crate::prompts;
use crate::types::NewsItem;

/// Returned (without any completion call) when there are no articles to
/// summarize.
pub const NO_NEWS_SENTINEL: &str = "No news articles found.";

/// Returned when every per-article analysis call failed.
pub const ANALYSIS_FAILED_SENTINEL: &str = "Failed to analyze news articles.";

/// Summarizes a batch of enriched articles.
pub struct Summarizer {
    llm: Arc<dyn CompletionClient>,
    mode: SummaryMode,
    max_tokens: u32,
    temperature: f32,
}

impl Summarizer {
    pub fn new(
        llm: Arc<dyn CompletionClient>,
        mode: SummaryMode,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            llm,
            mode,
            max_tokens,
            temperature,
        }
    }

    /// Summarize the batch, returning the summary text.
    ///
    /// An empty batch returns [`NO_NEWS_SENTINEL`] without touching the
    /// completion client.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Summarization`] when a required completion call
    /// fails: the synthesis call in two-stage mode, or the single combined
    /// call in single-stage mode.
    pub async fn summarize(&self, items: &[NewsItem]) -> Result<String, NewsError> {
        if items.is_empty() {
            return Ok(NO_NEWS_SENTINEL.to_string());
        }
        match self.mode {
            SummaryMode::SingleStage => self.single_stage(items).await,
            SummaryMode::TwoStage => self.two_stage(items).await,
        }
    }

    async fn single_stage(&self, items: &[NewsItem]) -> Result<String, NewsError> {
        let prompt = prompts::single_stage_prompt(items);
        let text = self
            .llm
            .complete(
                prompts::SYSTEM_PROMPT,
                &prompt,
                self.max_tokens,
                self.temperature,
            )
            .await
            .map_err(|e| NewsError::Summarization(e.to_string()))?;
        Ok(text.trim().to_string())
    }

    async fn two_stage(&self, items: &[NewsItem]) -> Result<String, NewsError> {
        let mut analyses = Vec::with_capacity(items.len());
        for item in items {
            let prompt = prompts::item_analysis_prompt(item);
            match self
                .llm
                .complete(
                    prompts::SYSTEM_PROMPT,
                    &prompt,
                    self.max_tokens,
                    self.temperature,
                )
                .await
            {
                Ok(analysis) => analyses.push(analysis),
                Err(e) => {
                    tracing::warn!(
                        title = %item.title,
                        error = %e,
                        "article analysis failed, continuing with remaining articles"
                    );
                }
            }
        }

        if analyses.is_empty() {
            return Ok(ANALYSIS_FAILED_SENTINEL.to_string());
        }

        let prompt = prompts::rollup_prompt(&analyses.join("\n\n"));
        let text = self
            .llm
            .complete(
                prompts::SYSTEM_PROMPT,
                &prompt,
                self.max_tokens,
                self.temperature,
            )
            .await
            .map_err(|e| NewsError::Summarization(e.to_string()))?;
        Ok(text.trim().to_string())
    }
}
