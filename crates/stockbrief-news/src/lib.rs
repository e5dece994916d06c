//! News summarization pipeline for stockbrief.
//!
//! Given a ticker symbol: fetch news candidates from a source backend, pull
//! and extract full article text, summarize the batch through a
//! chat-completion endpoint (per-article analysis followed by one synthesis
//! pass), and return the summary with ordered source citations.
//!
//! The pipeline is a single forward pass per request and holds no state
//! across requests.

pub mod enrich;
pub mod error;
pub mod pipeline;
pub mod query;
pub mod sources;
pub mod summarize;
pub mod types;

mod prompts;

pub use enrich::ArticleFetcher;
pub use error::NewsError;
pub use pipeline::NewsPipeline;
pub use query::NewsQuery;
pub use sources::{NewsSource, SearchRssSource, YahooFeedSource};
pub use summarize::{Summarizer, ANALYSIS_FAILED_SENTINEL, NO_NEWS_SENTINEL};
pub use types::{NewsItem, RawItem, SourceRef, SummaryResult};
