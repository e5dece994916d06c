//! Article content enrichment.
//!
//! Fetches each candidate's page and extracts readable text: prefer the
//! `<article>` region, fall back to `<main>`, then the full `<body>`, with
//! script/style/navigational subtrees dropped and whitespace collapsed.
//! Failures are absorbed per item; a bad article never aborts the batch.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::NewsError;
use crate::types::{NewsItem, RawItem};

/// Element subtrees excluded from extracted text.
const SKIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "noscript", "iframe",
];

/// Content regions tried in order of preference.
const CONTENT_SELECTORS: &[&str] = &["article", "main", "body"];

/// Fetches article pages and extracts bounded plain text.
pub struct ArticleFetcher {
    client: Client,
    max_chars: usize,
}

impl ArticleFetcher {
    /// Creates a fetcher with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::ContentFetch`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, max_chars: usize) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| NewsError::ContentFetch(e.to_string()))?;
        Ok(Self { client, max_chars })
    }

    /// Fetches one page and extracts its readable text.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::ContentFetch`] on network failure or a non-2xx
    /// status. Callers in this crate absorb the error per item.
    pub async fn fetch_article_text(&self, url: &str) -> Result<String, NewsError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NewsError::ContentFetch(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::ContentFetch(format!(
                "{url} returned status {status}"
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| NewsError::ContentFetch(format!("body of {url} unreadable: {e}")))?;

        Ok(extract_readable_text(&html, self.max_chars))
    }

    /// Enrich a batch of candidates concurrently, preserving input order.
    ///
    /// Each fetch is an independent task writing only to its own slot.
    /// Items whose enrichment fails or yields no text are dropped from the
    /// result; the rest keep their fetch order. Missing vendor timestamps
    /// default to the current time.
    pub async fn enrich_items(&self, raw_items: Vec<RawItem>) -> Vec<NewsItem> {
        let fetches = raw_items.iter().map(|item| self.content_or_empty(item));
        let bodies = futures::future::join_all(fetches).await;

        raw_items
            .into_iter()
            .zip(bodies)
            .filter_map(|(raw, content)| {
                if content.is_empty() {
                    tracing::warn!(url = %raw.link, "no article content extracted, dropping item");
                    return None;
                }
                Some(NewsItem {
                    title: raw.title,
                    content,
                    link: raw.link,
                    publisher: raw.publisher,
                    published_at: raw.published_at.unwrap_or_else(Utc::now),
                })
            })
            .collect()
    }

    async fn content_or_empty(&self, item: &RawItem) -> String {
        match self.fetch_article_text(&item.link).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(url = %item.link, error = %e, "article fetch failed, continuing");
                String::new()
            }
        }
    }
}

/// Extract readable plain text from an HTML document.
///
/// Prefers an `article` region, then `main`, then the full `body`. Text
/// inside script/style/navigational subtrees is dropped, interior whitespace
/// collapses to single spaces, and the result is truncated to `max_chars`
/// characters on a char boundary.
pub fn extract_readable_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);

    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(region) = document.select(&selector).next() {
            let text = readable_text(region);
            if !text.is_empty() {
                return truncate_chars(&text, max_chars);
            }
        }
    }

    // Fragment without <body> (or empty document): fall back to all text.
    let text: String = document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(&normalize_whitespace(&text), max_chars)
}

fn readable_text(region: scraper::ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in region.descendants() {
        if let Some(text) = node.value().as_text() {
            let in_skipped = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
            });
            if !in_skipped {
                out.push_str(text);
                out.push(' ');
            }
        }
    }
    normalize_whitespace(&out)
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}
