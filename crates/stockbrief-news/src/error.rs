use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    /// The news source call failed (transport, auth, or vendor-side error).
    /// Surfaced to the caller as a request-level failure.
    #[error("news source fetch failed: {0}")]
    UpstreamFetch(String),

    /// A single article body could not be fetched or parsed. Always absorbed
    /// by the enricher (the item gets empty content and is dropped); never
    /// aborts a batch.
    #[error("article content fetch failed: {0}")]
    ContentFetch(String),

    /// A completion call with no fallback failed. Surfaced to the caller
    /// with the upstream message, not retried.
    #[error("news summarization failed: {0}")]
    Summarization(String),

    /// The request itself was unusable (e.g. blank symbol).
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
