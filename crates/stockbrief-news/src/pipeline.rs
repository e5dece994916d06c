//! End-to-end summarization pipeline.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::enrich::ArticleFetcher;
use crate::error::NewsError;
use crate::query::NewsQuery;
use crate::sources::NewsSource;
use crate::summarize::Summarizer;
use crate::types::{SourceRef, SummaryResult};

/// One forward pass: query, fetch candidates, enrich, summarize, cite.
///
/// Holds no per-request state; a single instance is shared across requests.
pub struct NewsPipeline {
    source: Arc<dyn NewsSource>,
    fetcher: ArticleFetcher,
    summarizer: Summarizer,
    max_articles: usize,
}

impl NewsPipeline {
    pub fn new(
        source: Arc<dyn NewsSource>,
        fetcher: ArticleFetcher,
        summarizer: Summarizer,
        max_articles: usize,
    ) -> Self {
        Self {
            source,
            fetcher,
            summarizer,
            max_articles,
        }
    }

    /// Run the full pipeline for one symbol.
    ///
    /// The returned `sources` list has exactly one entry, in order, for each
    /// article that survived enrichment and was fed to the summarizer.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::InvalidQuery`] for a blank symbol,
    /// [`NewsError::UpstreamFetch`] when the news source fails, and
    /// [`NewsError::Summarization`] when a required completion call fails.
    pub async fn summarize_symbol(
        &self,
        symbol: &str,
        since: Option<NaiveDate>,
    ) -> Result<SummaryResult, NewsError> {
        let query = NewsQuery::new(symbol, since)?;

        let mut raw_items = self.source.fetch(&query).await?;
        raw_items.truncate(self.max_articles);
        tracing::info!(
            symbol = query.symbol(),
            candidates = raw_items.len(),
            "fetched news candidates"
        );

        let items = self.fetcher.enrich_items(raw_items).await;
        tracing::info!(
            symbol = query.symbol(),
            articles = items.len(),
            "enriched articles"
        );

        let summary = self.summarizer.summarize(&items).await?;
        let sources = items.iter().map(SourceRef::from).collect();

        Ok(SummaryResult { summary, sources })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use stockbrief_core::SummaryMode;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::summarize::test_support::ScriptedLlm;
    use crate::summarize::{ANALYSIS_FAILED_SENTINEL, NO_NEWS_SENTINEL};
    use crate::types::RawItem;

    struct ScriptedSource {
        result: Result<Vec<RawItem>, String>,
    }

    #[async_trait]
    impl NewsSource for ScriptedSource {
        async fn fetch(&self, _query: &NewsQuery) -> Result<Vec<RawItem>, NewsError> {
            match &self.result {
                Ok(items) => Ok(items.clone()),
                Err(msg) => Err(NewsError::UpstreamFetch(msg.clone())),
            }
        }
    }

    fn raw(base: &str, slug: &str) -> RawItem {
        RawItem {
            title: format!("Story {slug}"),
            link: format!("{base}/{slug}"),
            snippet: String::new(),
            publisher: Some("Example Wire".to_string()),
            published_at: Some(Utc::now()),
        }
    }

    fn pipeline(
        source: ScriptedSource,
        llm: Arc<ScriptedLlm>,
        max_articles: usize,
    ) -> NewsPipeline {
        let fetcher = ArticleFetcher::new(5, "test-agent", 1000).unwrap();
        let summarizer = Summarizer::new(llm, SummaryMode::TwoStage, 500, 0.7);
        NewsPipeline::new(Arc::new(source), fetcher, summarizer, max_articles)
    }

    async fn mount_article(server: &MockServer, slug: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/{slug}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                "<html><body><article><p>{body}</p></article></body></html>"
            )))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn blank_symbol_is_rejected_before_any_fetch() {
        let source = ScriptedSource {
            result: Err("must not be reached".to_string()),
        };
        let llm = Arc::new(ScriptedLlm::new(vec![]));
        let sut = pipeline(source, llm, 5);

        let result = sut.summarize_symbol("   ", None).await;
        assert!(matches!(result, Err(NewsError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn source_failure_propagates() {
        let source = ScriptedSource {
            result: Err("feed unavailable".to_string()),
        };
        let llm = Arc::new(ScriptedLlm::new(vec![]));
        let sut = pipeline(source, llm.clone(), 5);

        let result = sut.summarize_symbol("NVDA", None).await;
        match result {
            Err(NewsError::UpstreamFetch(msg)) => assert!(msg.contains("feed unavailable")),
            other => panic!("expected upstream error, got {other:?}"),
        }
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn zero_candidates_yield_sentinel_and_empty_sources() {
        let source = ScriptedSource {
            result: Ok(Vec::new()),
        };
        let llm = Arc::new(ScriptedLlm::new(vec![]));
        let sut = pipeline(source, llm.clone(), 5);

        let result = sut.summarize_symbol("NVDA", None).await.unwrap();
        assert_eq!(result.summary, NO_NEWS_SENTINEL);
        assert!(result.sources.is_empty());
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn sources_match_summarized_articles_in_order() {
        let server = MockServer::start().await;
        mount_article(&server, "alpha", "Alpha body text").await;
        mount_article(&server, "beta", "Beta body text").await;

        let base = server.uri();
        let source = ScriptedSource {
            result: Ok(vec![raw(&base, "alpha"), raw(&base, "beta")]),
        };
        let llm = Arc::new(ScriptedLlm::new(vec![
            Ok("analysis alpha"),
            Ok("analysis beta"),
            Ok("overall summary"),
        ]));
        let sut = pipeline(source, llm, 5);

        let result = sut.summarize_symbol("NVDA", None).await.unwrap();
        assert_eq!(result.summary, "overall summary");
        assert_eq!(result.sources.len(), 2);
        assert_eq!(result.sources[0].link, format!("{base}/alpha"));
        assert_eq!(result.sources[1].link, format!("{base}/beta"));
        assert_eq!(result.sources[0].publisher.as_deref(), Some("Example Wire"));
    }

    #[tokio::test]
    async fn failed_article_fetch_is_dropped_not_fatal() {
        let server = MockServer::start().await;
        mount_article(&server, "good", "Good body text").await;
        Mock::given(method("GET"))
            .and(path("/bad"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let base = server.uri();
        let source = ScriptedSource {
            result: Ok(vec![raw(&base, "bad"), raw(&base, "good")]),
        };
        let llm = Arc::new(ScriptedLlm::new(vec![Ok("analysis"), Ok("summary")]));
        let sut = pipeline(source, llm.clone(), 5);

        let result = sut.summarize_symbol("NVDA", None).await.unwrap();
        assert_eq!(result.summary, "summary");
        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.sources[0].link, format!("{base}/good"));
        // One analysis call plus the synthesis call.
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn candidate_cap_is_applied_before_enrichment() {
        let server = MockServer::start().await;
        mount_article(&server, "one", "First body").await;
        mount_article(&server, "two", "Second body").await;
        mount_article(&server, "three", "Third body").await;

        let base = server.uri();
        let source = ScriptedSource {
            result: Ok(vec![
                raw(&base, "one"),
                raw(&base, "two"),
                raw(&base, "three"),
            ]),
        };
        let llm = Arc::new(ScriptedLlm::new(vec![
            Ok("a1"),
            Ok("a2"),
            Ok("final"),
        ]));
        let sut = pipeline(source, llm, 2);

        let result = sut.summarize_symbol("NVDA", None).await.unwrap();
        assert_eq!(result.sources.len(), 2);
        assert_eq!(result.sources[1].link, format!("{base}/two"));
    }

    #[tokio::test]
    async fn all_analyses_failing_still_returns_sources() {
        let server = MockServer::start().await;
        mount_article(&server, "only", "Only body").await;

        let base = server.uri();
        let source = ScriptedSource {
            result: Ok(vec![raw(&base, "only")]),
        };
        let llm = Arc::new(ScriptedLlm::new(vec![Err("down")]));
        let sut = pipeline(source, llm, 5);

        let result = sut.summarize_symbol("NVDA", None).await.unwrap();
        assert_eq!(result.summary, ANALYSIS_FAILED_SENTINEL);
        assert_eq!(result.sources.len(), 1);
    }
}
