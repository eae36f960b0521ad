//! HTTP client for a hosted text-classification inference endpoint.

use std::time::Duration;

use pulso_core::SentimentLabel;
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;

/// Model input is truncated to this many characters; the models in use
/// reject longer sequences anyway.
const MAX_INPUT_CHARS: usize = 512;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f32,
}

/// Client for one configured classification model.
///
/// Speaks the hosted-inference convention: `POST {base}/{model}` with
/// `{"inputs": text}`, response `[[{label, score}, ...]]` (one inner list
/// per input, one entry per class).
pub struct ModelClient {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl ModelClient {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        model: &str,
        token: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/{model}", base_url.trim_end_matches('/')),
            token: token.map(str::to_owned),
        })
    }

    /// Classify one text, returning the top label and its score.
    ///
    /// # Errors
    ///
    /// [`SentimentError::Api`] on a non-2xx status, [`SentimentError::Response`]
    /// when the body does not contain at least one prediction.
    pub async fn classify(&self, text: &str) -> Result<(SentimentLabel, f32), SentimentError> {
        let input = truncate_chars(text, MAX_INPUT_CHARS);
        let mut request = self.client.post(&self.url).json(&InferenceRequest { inputs: input });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SentimentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let predictions: Vec<Vec<Prediction>> = response.json().await?;
        let best = predictions
            .first()
            .and_then(|preds| {
                preds
                    .iter()
                    .max_by(|a, b| a.score.total_cmp(&b.score))
            })
            .ok_or_else(|| SentimentError::Response("empty prediction list".to_owned()))?;

        Ok((map_label(&best.label), best.score))
    }
}

/// Model label vocabularies vary (`POSITIVE`, `positive`, `POS`, `LABEL_2`
/// aliases mapped upstream); match on the POSITIVE/NEGATIVE stems and treat
/// anything else as neutral.
fn map_label(raw: &str) -> SentimentLabel {
    let upper = raw.to_uppercase();
    if upper.contains("POSITIVE") || upper.contains("POS") {
        SentimentLabel::Positive
    } else if upper.contains("NEGATIVE") || upper.contains("NEG") {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Truncates to at most `max` characters without splitting a code point.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_mapping_covers_common_vocabularies() {
        assert_eq!(map_label("POSITIVE"), SentimentLabel::Positive);
        assert_eq!(map_label("positive"), SentimentLabel::Positive);
        assert_eq!(map_label("POS"), SentimentLabel::Positive);
        assert_eq!(map_label("NEGATIVE"), SentimentLabel::Negative);
        assert_eq!(map_label("neg"), SentimentLabel::Negative);
        assert_eq!(map_label("NEUTRAL"), SentimentLabel::Neutral);
        assert_eq!(map_label("LABEL_1"), SentimentLabel::Neutral);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(600);
        let cut = truncate_chars(&text, 512);
        assert_eq!(cut.chars().count(), 512);

        let short = "hola";
        assert_eq!(truncate_chars(short, 512), "hola");
    }
}
