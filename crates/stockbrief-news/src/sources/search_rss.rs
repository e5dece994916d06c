//! Search-engine news source driven by the built query string.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;

use super::rss_helpers;
use super::NewsSource;
use crate::error::NewsError;
use crate::query::NewsQuery;
use crate::types::RawItem;

const DEFAULT_BASE_URL: &str = "https://news.search.yahoo.com";

/// News source that runs the rendered search query against a news search
/// RSS endpoint. Used when `STOCKBRIEF_NEWS_SOURCE=search`.
pub struct SearchRssSource {
    client: Client,
    base_url: String,
    max_items: usize,
}

impl SearchRssSource {
    /// Creates a source pointed at the production search endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::UpstreamFetch`] if the HTTP client cannot be
    /// constructed.
    pub fn new(timeout_secs: u64, max_items: usize) -> Result<Self, NewsError> {
        Self::with_base_url(timeout_secs, max_items, DEFAULT_BASE_URL)
    }

    /// Creates a source with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::UpstreamFetch`] if the HTTP client cannot be
    /// constructed.
    pub fn with_base_url(
        timeout_secs: u64,
        max_items: usize,
        base_url: &str,
    ) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("stockbrief/0.1 (news-summarizer)")
            .build()
            .map_err(|e| NewsError::UpstreamFetch(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_items,
        })
    }
}

#[async_trait]
impl NewsSource for SearchRssSource {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<RawItem>, NewsError> {
        let encoded = utf8_percent_encode(&query.search_query(), NON_ALPHANUMERIC).to_string();
        let url = format!("{}/rss?p={encoded}", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NewsError::UpstreamFetch(format!("news search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::UpstreamFetch(format!(
                "news search returned status {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| NewsError::UpstreamFetch(format!("news search body unreadable: {e}")))?;

        // Some endpoints answer 200 with an HTML interstitial instead of a
        // feed; treat that as zero results rather than a parse failure.
        if !body.contains("<rss") && !body.contains("<feed") {
            tracing::debug!(symbol = query.symbol(), "search response carried no feed");
            return Ok(Vec::new());
        }

        let items = rss_helpers::parse_rss_feed(&body, self.max_items)?;
        tracing::debug!(
            symbol = query.symbol(),
            count = items.len(),
            "collected search news candidates"
        );
        Ok(items)
    }
}
