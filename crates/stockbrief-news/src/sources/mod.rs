//! News source backends.
//!
//! A source turns a [`NewsQuery`] into a bounded list of candidates. Zero
//! results is an `Ok(vec![])`, never an error; transport and vendor failures
//! map to [`NewsError::UpstreamFetch`] with the upstream message preserved.

mod rss_helpers;
mod search_rss;
mod yahoo_feed;

use async_trait::async_trait;

pub use search_rss::SearchRssSource;
pub use yahoo_feed::YahooFeedSource;

use crate::error::NewsError;
use crate::query::NewsQuery;
use crate::types::RawItem;

/// Capability: fetch news candidates for a query.
///
/// Every returned item carries at minimum a title and a link;
/// publisher and timestamp are best-effort.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// # Errors
    ///
    /// Returns [`NewsError::UpstreamFetch`] when the backend call fails.
    /// An empty result set is not an error.
    async fn fetch(&self, query: &NewsQuery) -> Result<Vec<RawItem>, NewsError>;
}
