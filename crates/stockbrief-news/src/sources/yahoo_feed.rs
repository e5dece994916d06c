//! Vendor news feed keyed by symbol (Yahoo Finance search endpoint).

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::NewsSource;
use crate::error::NewsError;
use crate::query::NewsQuery;
use crate::types::RawItem;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// News source backed by the vendor's built-in "news for symbol" feed.
///
/// The endpoint returns a JSON envelope whose `news` array carries title,
/// link, publisher, and a unix-seconds publish time. A missing or empty
/// `news` array is a normal zero-result response.
pub struct YahooFeedSource {
    client: Client,
    base_url: Url,
    max_items: usize,
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    news: Vec<FeedArticle>,
}

#[derive(Debug, Deserialize)]
struct FeedArticle {
    title: String,
    link: String,
    publisher: Option<String>,
    #[serde(rename = "providerPublishTime")]
    provider_publish_time: Option<i64>,
}

impl YahooFeedSource {
    /// Creates a source pointed at the production feed endpoint.
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
    /// constructed or `base_url` is not a valid URL.
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

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| {
            NewsError::UpstreamFetch(format!("invalid base URL '{base_url}': {e}"))
        })?;

        Ok(Self {
            client,
            base_url,
            max_items,
        })
    }

    fn feed_url(&self, symbol: &str) -> Result<Url, NewsError> {
        let mut url = self
            .base_url
            .join("v1/finance/search")
            .map_err(|e| NewsError::UpstreamFetch(format!("invalid feed URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("q", symbol)
            .append_pair("newsCount", &self.max_items.to_string())
            .append_pair("quotesCount", "0");
        Ok(url)
    }
}

#[async_trait]
impl NewsSource for YahooFeedSource {
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<RawItem>, NewsError> {
        let url = self.feed_url(query.symbol())?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| NewsError::UpstreamFetch(format!("news feed request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::UpstreamFetch(format!(
                "news feed returned status {status}: {body}"
            )));
        }

        let parsed: FeedResponse = response
            .json()
            .await
            .map_err(|e| NewsError::UpstreamFetch(format!("news feed response malformed: {e}")))?;

        let items: Vec<RawItem> = parsed
            .news
            .into_iter()
            .take(self.max_items)
            .map(|article| RawItem {
                title: article.title,
                link: article.link,
                snippet: String::new(),
                publisher: article.publisher,
                published_at: article
                    .provider_publish_time
                    .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            })
            .collect();

        tracing::debug!(
            symbol = query.symbol(),
            count = items.len(),
            "collected feed news candidates"
        );
        Ok(items)
    }
}
