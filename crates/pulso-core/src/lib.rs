//! Shared domain types and configuration for Pulso.
//!
//! Pulso ingests social-media posts and comments via scraping actors, scores
//! comment sentiment, and persists the results for dashboard consumers. This
//! crate holds the platform-neutral types the other crates exchange: the
//! normalized post/comment shapes, sentiment labels, per-profile analysis
//! results, and both layers of configuration (process env + runtime
//! settings).

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod settings;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use settings::{ActorKind, AnalysisSettings, DateWindow};
pub use types::{
    AnalysisResult, NormalizedComment, NormalizedPost, ParsePlatformError, Platform, Sentiment,
    SentimentLabel, SentimentMethod,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
