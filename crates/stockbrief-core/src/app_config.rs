use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which backend supplies news candidates for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsSourceKind {
    /// Vendor news feed keyed by symbol (default).
    Feed,
    /// Free-text news search driven by the built query string.
    Search,
}

/// How the summarizer talks to the completion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryMode {
    /// One combined prompt over all articles.
    SingleStage,
    /// Per-article analysis, then one synthesis pass (default).
    TwoStage,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub openai_api_key: String,
    pub openai_api_base: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
    pub llm_timeout_secs: u64,
    pub news_source: NewsSourceKind,
    /// Optional base-URL override for the news backend (tests, proxies).
    pub news_base_url: Option<String>,
    pub max_articles: usize,
    pub summary_mode: SummaryMode,
    pub article_timeout_secs: u64,
    pub article_user_agent: String,
    pub article_max_chars: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("openai_api_key", &"[redacted]")
            .field("openai_api_base", &self.openai_api_base)
            .field("llm_model", &self.llm_model)
            .field("llm_max_tokens", &self.llm_max_tokens)
            .field("llm_temperature", &self.llm_temperature)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("news_source", &self.news_source)
            .field("news_base_url", &self.news_base_url)
            .field("max_articles", &self.max_articles)
            .field("summary_mode", &self.summary_mode)
            .field("article_timeout_secs", &self.article_timeout_secs)
            .field("article_user_agent", &self.article_user_agent)
            .field("article_max_chars", &self.article_max_chars)
            .finish()
    }
}
