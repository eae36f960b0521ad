use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference endpoint returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("inference response malformed: {0}")]
    Response(String),
}
