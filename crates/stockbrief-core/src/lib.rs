//! Shared configuration for the stockbrief service.
//!
//! Holds the environment-driven [`AppConfig`] consumed by the server and CLI,
//! plus the startup-time [`ConfigError`] taxonomy. A missing `OPENAI_API_KEY`
//! is fatal here, before any request is served.

mod app_config;
mod config;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, NewsSourceKind, SummaryMode};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
