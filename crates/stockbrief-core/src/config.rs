use crate::app_config::{AppConfig, Environment, NewsSourceKind, SummaryMode};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f32 = |var: &str, default: &str| -> Result<f32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let openai_api_key = require("OPENAI_API_KEY")?;

    let env = parse_environment(&or_default("STOCKBRIEF_ENV", "development"));
    let bind_addr = parse_addr("STOCKBRIEF_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("STOCKBRIEF_LOG_LEVEL", "info");

    let openai_api_base = or_default("OPENAI_API_BASE", "https://api.openai.com/v1");
    let llm_model = or_default("STOCKBRIEF_LLM_MODEL", "gpt-4o-mini");
    let llm_max_tokens = parse_u32("STOCKBRIEF_LLM_MAX_TOKENS", "500")?;
    let llm_temperature = parse_f32("STOCKBRIEF_LLM_TEMPERATURE", "0.7")?;
    let llm_timeout_secs = parse_u64("STOCKBRIEF_LLM_TIMEOUT_SECS", "60")?;

    let news_source = parse_news_source(&or_default("STOCKBRIEF_NEWS_SOURCE", "feed"))?;
    let news_base_url = lookup("STOCKBRIEF_NEWS_BASE_URL").ok();
    let max_articles = parse_usize("STOCKBRIEF_MAX_ARTICLES", "5")?.clamp(1, 10);
    let summary_mode = parse_summary_mode(&or_default("STOCKBRIEF_SUMMARY_MODE", "two-stage"))?;

    let article_timeout_secs = parse_u64("STOCKBRIEF_ARTICLE_TIMEOUT_SECS", "15")?;
    let article_user_agent = or_default(
        "STOCKBRIEF_ARTICLE_USER_AGENT",
        "stockbrief/0.1 (news-summarizer)",
    );
    let article_max_chars = parse_usize("STOCKBRIEF_ARTICLE_MAX_CHARS", "1000")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        openai_api_key,
        openai_api_base,
        llm_model,
        llm_max_tokens,
        llm_temperature,
        llm_timeout_secs,
        news_source,
        news_base_url,
        max_articles,
        summary_mode,
        article_timeout_secs,
        article_user_agent,
        article_max_chars,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_news_source(s: &str) -> Result<NewsSourceKind, ConfigError> {
    match s {
        "feed" => Ok(NewsSourceKind::Feed),
        "search" => Ok(NewsSourceKind::Search),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOCKBRIEF_NEWS_SOURCE".to_string(),
            reason: format!("expected 'feed' or 'search', got '{other}'"),
        }),
    }
}

fn parse_summary_mode(s: &str) -> Result<SummaryMode, ConfigError> {
    match s {
        "two-stage" => Ok(SummaryMode::TwoStage),
        "single-stage" => Ok(SummaryMode::SingleStage),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOCKBRIEF_SUMMARY_MODE".to_string(),
            reason: format!("expected 'two-stage' or 'single-stage', got '{other}'"),
        }),
    }
}
