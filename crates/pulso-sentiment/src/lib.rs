//! Sentiment analysis for Pulso.
//!
//! Scores comment text with configured keyword rules first, then a hosted
//! text-classification model; every degradation path lands on a neutral
//! verdict with the method recorded, so callers never handle errors.

pub mod analyzer;
pub mod error;
pub mod keywords;
pub mod model;

pub use analyzer::SentimentAnalyzer;
pub use error::SentimentError;
pub use keywords::keyword_match;
pub use model::ModelClient;
