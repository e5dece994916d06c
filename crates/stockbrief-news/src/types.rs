use chrono::{DateTime, Utc};
use serde::Serialize;

/// A news candidate as returned by a source backend, before enrichment.
///
/// Title and link are always present; publisher and timestamp are
/// best-effort vendor fields.
#[derive(Debug, Clone)]
pub struct RawItem {
    pub title: String,
    pub link: String,
    /// Short description or snippet from the source, possibly empty.
    pub snippet: String,
    pub publisher: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// An enriched news article, immutable once constructed.
#[derive(Debug, Clone)]
pub struct NewsItem {
    pub title: String,
    /// Extracted article text, truncated. Possibly empty when enrichment
    /// failed (such items are dropped before summarization).
    pub content: String,
    pub link: String,
    pub publisher: Option<String>,
    /// Vendor timestamp, or fetch time when the vendor field was missing or
    /// unparsable.
    pub published_at: DateTime<Utc>,
}

/// Citation for one summarized article.
#[derive(Debug, Clone, Serialize)]
pub struct SourceRef {
    pub link: String,
    pub publisher: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl From<&NewsItem> for SourceRef {
    fn from(item: &NewsItem) -> Self {
        Self {
            link: item.link.clone(),
            publisher: item.publisher.clone(),
            published_at: item.published_at,
        }
    }
}

/// Final result of one summarization request.
///
/// `sources` always has the same length and order as the article sequence
/// that was actually summarized.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    pub summary: String,
    pub sources: Vec<SourceRef>,
}
