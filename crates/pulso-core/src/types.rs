//! Normalized domain types exchanged between the scraper, sentiment, and
//! persistence layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Social platform a profile belongs to.
///
/// Stored and serialized as the lowercase platform name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
    Facebook,
}

impl Platform {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Facebook => "facebook",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown platform: {0}")]
pub struct ParsePlatformError(String);

impl std::str::FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::Tiktok),
            "facebook" => Ok(Platform::Facebook),
            other => Err(ParsePlatformError(other.to_string())),
        }
    }
}

/// A post extracted from a raw scraped item, ready for persistence.
///
/// Identity is `(platform, external_id)`; re-scraping the same post updates
/// its metrics in place rather than duplicating the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPost {
    pub external_id: String,
    pub url: Option<String>,
    pub text: Option<String>,
    pub likes: i64,
    pub comments_count: i64,
    pub shares: i64,
    pub views: i64,
    /// Platform timestamp; `None` when the raw value could not be parsed.
    pub posted_at: Option<DateTime<Utc>>,
}

impl NormalizedPost {
    /// Total engagement, always derived from its components.
    #[must_use]
    pub const fn interactions_total(&self) -> i64 {
        self.likes + self.comments_count + self.shares + self.views
    }
}

/// A comment extracted from a raw scraped item.
///
/// Identity is `(post_id, external_id)`. Sentiment lives on comments only;
/// posts never carry a sentiment of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedComment {
    pub external_id: String,
    pub text: Option<String>,
    pub author: Option<String>,
    pub likes: i64,
    pub posted_at: Option<DateTime<Utc>>,
}

/// Sentiment classification labels, stored uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
        }
    }
}

/// How a sentiment value was produced, stored lowercase.
///
/// `Keyword` and `Model` are real classifications; `Fallback` means no model
/// was available, `Error` that the model call failed, and `Empty` that there
/// was no text to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentMethod {
    Keyword,
    Model,
    Fallback,
    Error,
    Empty,
}

impl SentimentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SentimentMethod::Keyword => "keyword",
            SentimentMethod::Model => "model",
            SentimentMethod::Fallback => "fallback",
            SentimentMethod::Error => "error",
            SentimentMethod::Empty => "empty",
        }
    }
}

/// A sentiment classification attached to one comment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    pub label: SentimentLabel,
    /// Confidence in `[0.0, 1.0]`.
    pub score: f32,
    pub method: SentimentMethod,
}

impl Sentiment {
    /// The neutral result used for empty text, missing models, and model
    /// failures; only the method distinguishes them.
    #[must_use]
    pub const fn neutral(method: SentimentMethod) -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: 0.5,
            method,
        }
    }
}

/// Per-profile outcome of one analysis run. Transient — returned to the
/// caller, never persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisResult {
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub posts_scraped: usize,
    pub comments_scraped: usize,
    pub errors: Vec<String>,
}

impl AnalysisResult {
    /// Result for a profile that was skipped before any scraping started.
    #[must_use]
    pub fn skipped(reason: &str) -> Self {
        Self {
            skipped: true,
            reason: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Result for a run that failed outright, carrying a single top-level
    /// error.
    #[must_use]
    pub fn failed(error: String) -> Self {
        Self {
            errors: vec![error],
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_round_trips_through_str() {
        for p in [Platform::Instagram, Platform::Tiktok, Platform::Facebook] {
            assert_eq!(p.as_str().parse::<Platform>().unwrap(), p);
        }
    }

    #[test]
    fn platform_parse_is_case_insensitive() {
        assert_eq!("TikTok".parse::<Platform>().unwrap(), Platform::Tiktok);
    }

    #[test]
    fn platform_parse_rejects_unknown() {
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn interactions_total_sums_all_components() {
        let post = NormalizedPost {
            external_id: "p1".to_string(),
            url: None,
            text: None,
            likes: 10,
            comments_count: 3,
            shares: 2,
            views: 100,
            posted_at: None,
        };
        assert_eq!(post.interactions_total(), 115);
    }

    #[test]
    fn interactions_total_all_zero() {
        let post = NormalizedPost {
            external_id: "p1".to_string(),
            url: None,
            text: None,
            likes: 0,
            comments_count: 0,
            shares: 0,
            views: 0,
            posted_at: None,
        };
        assert_eq!(post.interactions_total(), 0);
    }

    #[test]
    fn sentiment_label_serializes_uppercase() {
        let json = serde_json::to_string(&SentimentLabel::Positive).unwrap();
        assert_eq!(json, "\"POSITIVE\"");
    }

    #[test]
    fn sentiment_method_serializes_lowercase() {
        let json = serde_json::to_string(&SentimentMethod::Fallback).unwrap();
        assert_eq!(json, "\"fallback\"");
    }

    #[test]
    fn skipped_result_has_reason_and_no_counts() {
        let result = AnalysisResult::skipped("analyzed_recently");
        assert!(result.skipped);
        assert_eq!(result.reason.as_deref(), Some("analyzed_recently"));
        assert_eq!(result.posts_scraped, 0);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn failed_result_carries_single_error() {
        let result = AnalysisResult::failed("boom".to_string());
        assert!(!result.skipped);
        assert_eq!(result.errors, vec!["boom".to_string()]);
    }
}
