//! The sentiment decision chain: empty check, keyword rules, then model.

use pulso_core::{Sentiment, SentimentMethod};

use crate::keywords::keyword_match;
use crate::model::ModelClient;

/// Confidence attached to keyword-rule hits.
const KEYWORD_SCORE: f32 = 0.9;

/// Decides a sentiment for each comment text.
///
/// The chain is: empty text → neutral without any network call; keyword
/// rule hit → that label at fixed confidence; no model configured →
/// neutral fallback; model error → neutral with method `error`; otherwise
/// the model's verdict. `analyze` never returns an error — a comment
/// always gets a sentiment row.
pub struct SentimentAnalyzer {
    model: Option<ModelClient>,
    keywords_positive: Vec<String>,
    keywords_negative: Vec<String>,
}

impl SentimentAnalyzer {
    #[must_use]
    pub fn new(
        model: Option<ModelClient>,
        keywords_positive: Vec<String>,
        keywords_negative: Vec<String>,
    ) -> Self {
        Self {
            model,
            keywords_positive,
            keywords_negative,
        }
    }

    pub async fn analyze(&self, text: Option<&str>) -> Sentiment {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return Sentiment::neutral(SentimentMethod::Empty);
        };

        if let Some(label) = keyword_match(text, &self.keywords_positive, &self.keywords_negative) {
            return Sentiment {
                label,
                score: KEYWORD_SCORE,
                method: SentimentMethod::Keyword,
            };
        }

        let Some(model) = &self.model else {
            return Sentiment::neutral(SentimentMethod::Fallback);
        };

        match model.classify(text).await {
            Ok((label, score)) => Sentiment {
                label,
                score,
                method: SentimentMethod::Model,
            },
            Err(err) => {
                tracing::warn!(error = %err, "model inference failed, degrading to neutral");
                Sentiment::neutral(SentimentMethod::Error)
            }
        }
    }
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
