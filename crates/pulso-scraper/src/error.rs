use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("scraping service rejected credentials: {0}")]
    Auth(String),

    #[error("scraping service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("transient scraping service error (status {status}): {message}")]
    Transient { status: u16, message: String },

    #[error("actor run {run_id} ended with status {status}")]
    RunFailed { run_id: String, status: String },

    #[error("gave up polling actor run {run_id} after {polls} checks")]
    PollLimit { run_id: String, polls: usize },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure to extract an identity key from a raw scraped item.
///
/// Every other per-field failure degrades that field to its default; only a
/// missing id fails the extraction, so the caller can count the item as an
/// error and move on.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("raw item has no usable post id")]
    MissingPostId,

    #[error("raw item has no usable comment id")]
    MissingCommentId,
}
