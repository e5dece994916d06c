mod api;
mod middleware;

use std::sync::Arc;

use stockbrief_core::{AppConfig, NewsSourceKind};
use stockbrief_llm::OpenAiClient;
use stockbrief_news::{
    ArticleFetcher, NewsPipeline, NewsSource, SearchRssSource, Summarizer, YahooFeedSource,
};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = stockbrief_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pipeline = Arc::new(build_pipeline(&config)?);
    let app = build_app(AppState { pipeline });

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Wire the pipeline from configuration: news source backend, article
/// fetcher, and summarizer sharing one completion client.
fn build_pipeline(config: &AppConfig) -> anyhow::Result<NewsPipeline> {
    let source: Arc<dyn NewsSource> = match config.news_source {
        NewsSourceKind::Feed => match &config.news_base_url {
            Some(base) => Arc::new(YahooFeedSource::with_base_url(
                config.article_timeout_secs,
                config.max_articles,
                base,
            )?),
            None => Arc::new(YahooFeedSource::new(
                config.article_timeout_secs,
                config.max_articles,
            )?),
        },
        NewsSourceKind::Search => match &config.news_base_url {
            Some(base) => Arc::new(SearchRssSource::with_base_url(
                config.article_timeout_secs,
                config.max_articles,
                base,
            )?),
            None => Arc::new(SearchRssSource::new(
                config.article_timeout_secs,
                config.max_articles,
            )?),
        },
    };

    let fetcher = ArticleFetcher::new(
        config.article_timeout_secs,
        &config.article_user_agent,
        config.article_max_chars,
    )?;

    let llm = OpenAiClient::with_base_url(
        &config.openai_api_key,
        &config.llm_model,
        config.llm_timeout_secs,
        &config.openai_api_base,
    )?;
    let summarizer = Summarizer::new(
        Arc::new(llm),
        config.summary_mode,
        config.llm_max_tokens,
        config.llm_temperature,
    );

    Ok(NewsPipeline::new(
        source,
        fetcher,
        summarizer,
        config.max_articles,
    ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
