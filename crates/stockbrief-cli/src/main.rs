use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use stockbrief_core::{AppConfig, NewsSourceKind};
use stockbrief_llm::OpenAiClient;
use stockbrief_news::{
    ArticleFetcher, NewsPipeline, NewsSource, SearchRssSource, Summarizer, YahooFeedSource,
};

#[derive(Debug, Parser)]
#[command(name = "stockbrief-cli")]
#[command(about = "Stock news summarizer command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch, analyze, and summarize recent news for a ticker symbol.
    Summarize {
        /// Ticker symbol, e.g. NVDA.
        symbol: String,
        /// Only consider news published on or after this date (YYYY-MM-DD).
        #[arg(long)]
        since: Option<NaiveDate>,
        /// Print the full result as JSON instead of formatted text.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Summarize {
            symbol,
            since,
            json,
        } => {
            let config = stockbrief_core::load_app_config()?;
            let pipeline = build_pipeline(&config)?;
            let result = pipeline.summarize_symbol(&symbol, since).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.summary);
                if !result.sources.is_empty() {
                    println!("\nSources:");
                    for source in &result.sources {
                        match &source.publisher {
                            Some(publisher) => println!("  - {} ({publisher})", source.link),
                            None => println!("  - {}", source.link),
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

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
