use pulso_core::{ParsePlatformError, Platform};
use thiserror::Error;

/// Errors that escape the batch runner itself. Per-profile failures never
/// land here; they are folded into that profile's `AnalysisResult`.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Db(#[from] pulso_db::DbError),
}

/// Failure of one profile run, caught at the orchestrator boundary and
/// converted into an error-shaped `AnalysisResult`.
#[derive(Debug, Error)]
pub(crate) enum RunError {
    #[error("database error: {0}")]
    Db(#[from] pulso_db::DbError),

    #[error("scrape failed: {0}")]
    Scrape(#[from] pulso_scraper::ScrapeError),

    #[error(transparent)]
    Platform(#[from] ParsePlatformError),

    #[error("no posts actor configured for platform {0}")]
    NoPostsActor(Platform),
}
