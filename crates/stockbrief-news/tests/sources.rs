use stockbrief_news::{NewsError, NewsQuery, NewsSource, SearchRssSource, YahooFeedSource};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn feed_body() -> serde_json::Value {
    serde_json::json!({
        "count": 2,
        "news": [
            {
                "uuid": "a1",
                "title": "Chipmaker beats estimates",
                "link": "https://example.com/a",
                "publisher": "Example Wire",
                "providerPublishTime": 1_708_441_445_i64
            },
            {
                "uuid": "b2",
                "title": "Second story",
                "link": "https://example.com/b"
            }
        ]
    })
}

#[tokio::test]
async fn yahoo_feed_parses_news_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/finance/search"))
        .and(query_param("q", "NVDA"))
        .and(query_param("newsCount", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
        .mount(&server)
        .await;

    let source = YahooFeedSource::with_base_url(10, 5, &server.uri()).unwrap();
    let query = NewsQuery::new("NVDA", None).unwrap();
    let items = source.fetch(&query).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Chipmaker beats estimates");
    assert_eq!(items[0].link, "https://example.com/a");
    assert_eq!(items[0].publisher.as_deref(), Some("Example Wire"));
    let ts = items[0].published_at.expect("publish time should parse");
    assert_eq!(ts.timestamp(), 1_708_441_445);

    // Optional vendor fields degrade to None.
    assert!(items[1].publisher.is_none());
    assert!(items[1].published_at.is_none());
}

#[tokio::test]
async fn yahoo_feed_missing_news_array_is_zero_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/finance/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 0})))
        .mount(&server)
        .await;

    let source = YahooFeedSource::with_base_url(10, 5, &server.uri()).unwrap();
    let query = NewsQuery::new("ZZZZ", None).unwrap();
    let items = source.fetch(&query).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn yahoo_feed_caps_item_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/finance/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feed_body()))
        .mount(&server)
        .await;

    let source = YahooFeedSource::with_base_url(10, 1, &server.uri()).unwrap();
    let query = NewsQuery::new("NVDA", None).unwrap();
    let items = source.fetch(&query).await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn yahoo_feed_server_error_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/finance/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let source = YahooFeedSource::with_base_url(10, 5, &server.uri()).unwrap();
    let query = NewsQuery::new("NVDA", None).unwrap();
    match source.fetch(&query).await {
        Err(NewsError::UpstreamFetch(msg)) => {
            assert!(msg.contains("503"), "message: {msg}");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn yahoo_feed_malformed_body_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/finance/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let source = YahooFeedSource::with_base_url(10, 5, &server.uri()).unwrap();
    let query = NewsQuery::new("NVDA", None).unwrap();
    assert!(matches!(
        source.fetch(&query).await,
        Err(NewsError::UpstreamFetch(_))
    ));
}

const SEARCH_FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Search results</title>
    <item>
      <title>Search hit one</title>
      <link>https://example.com/hit-1</link>
      <description>First snippet</description>
      <pubDate>Tue, 20 Feb 2024 15:04:05 +0000</pubDate>
      <source>Example Wire</source>
    </item>
    <item>
      <title>Search hit two</title>
      <link>https://example.com/hit-2</link>
    </item>
  </channel>
</rss>"#;

#[tokio::test]
async fn search_rss_sends_rendered_query_and_parses_items() {
    let server = MockServer::start().await;
    let query = NewsQuery::new("NVDA", None).unwrap();
    Mock::given(method("GET"))
        .and(path("/rss"))
        .and(query_param("p", query.search_query()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SEARCH_FEED)
                .insert_header("content-type", "application/rss+xml"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = SearchRssSource::with_base_url(10, 5, &server.uri()).unwrap();
    let items = source.fetch(&query).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Search hit one");
    assert_eq!(items[0].snippet, "First snippet");
    assert_eq!(items[0].publisher.as_deref(), Some("Example Wire"));
    assert!(items[1].published_at.is_none());
}

#[tokio::test]
async fn search_rss_html_interstitial_is_zero_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Please verify you are human</body></html>"),
        )
        .mount(&server)
        .await;

    let source = SearchRssSource::with_base_url(10, 5, &server.uri()).unwrap();
    let query = NewsQuery::new("NVDA", None).unwrap();
    let items = source.fetch(&query).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn search_rss_server_error_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let source = SearchRssSource::with_base_url(10, 5, &server.uri()).unwrap();
    let query = NewsQuery::new("NVDA", None).unwrap();
    match source.fetch(&query).await {
        Err(NewsError::UpstreamFetch(msg)) => assert!(msg.contains("429"), "message: {msg}"),
        other => panic!("expected upstream error, got {other:?}"),
    }
}
