use super::*;

use pulso_core::{SentimentLabel, SentimentMethod};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::model::ModelClient;

fn keyword_analyzer(model: Option<ModelClient>) -> SentimentAnalyzer {
    SentimentAnalyzer::new(
        model,
        vec!["excelente".to_owned()],
        vec!["horrible".to_owned()],
    )
}

async fn model_for(server: &MockServer) -> ModelClient {
    ModelClient::new(&server.uri(), "some/model", Some("hf-token"), 5).unwrap()
}

#[tokio::test]
async fn empty_and_missing_text_short_circuit() {
    let analyzer = keyword_analyzer(None);
    for text in [None, Some(""), Some("   ")] {
        let sentiment = analyzer.analyze(text).await;
        assert_eq!(sentiment.label, SentimentLabel::Neutral);
        assert_eq!(sentiment.method, SentimentMethod::Empty);
        assert!((sentiment.score - 0.5).abs() < f32::EPSILON);
    }
}

#[tokio::test]
async fn keyword_hit_skips_the_model_entirely() {
    // No mock server mounted: a model call would error, so a keyword
    // verdict proves the fast path was taken.
    let server = MockServer::start().await;
    let analyzer = keyword_analyzer(Some(model_for(&server).await));

    let sentiment = analyzer.analyze(Some("servicio EXCELENTE")).await;
    assert_eq!(sentiment.label, SentimentLabel::Positive);
    assert_eq!(sentiment.method, SentimentMethod::Keyword);
    assert!((sentiment.score - 0.9).abs() < f32::EPSILON);
}

#[tokio::test]
async fn no_model_configured_degrades_to_fallback() {
    let analyzer = keyword_analyzer(None);
    let sentiment = analyzer.analyze(Some("comentario cualquiera")).await;
    assert_eq!(sentiment.label, SentimentLabel::Neutral);
    assert_eq!(sentiment.method, SentimentMethod::Fallback);
}

#[tokio::test]
async fn model_verdict_is_used_when_keywords_miss() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/some/model"))
        .and(body_json(json!({"inputs": "no lo esperaba"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            {"label": "negative", "score": 0.83},
            {"label": "neutral", "score": 0.12},
            {"label": "positive", "score": 0.05}
        ]])))
        .mount(&server)
        .await;

    let analyzer = keyword_analyzer(Some(model_for(&server).await));
    let sentiment = analyzer.analyze(Some("no lo esperaba")).await;
    assert_eq!(sentiment.label, SentimentLabel::Negative);
    assert_eq!(sentiment.method, SentimentMethod::Model);
    assert!((sentiment.score - 0.83).abs() < f32::EPSILON);
}

#[tokio::test]
async fn model_error_degrades_to_neutral_error_method() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/some/model"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
        .mount(&server)
        .await;

    let analyzer = keyword_analyzer(Some(model_for(&server).await));
    let sentiment = analyzer.analyze(Some("texto sin keywords")).await;
    assert_eq!(sentiment.label, SentimentLabel::Neutral);
    assert_eq!(sentiment.method, SentimentMethod::Error);
    assert!((sentiment.score - 0.5).abs() < f32::EPSILON);
}

#[tokio::test]
async fn long_input_is_truncated_before_the_call() {
    let server = MockServer::start().await;
    let long_text = "a".repeat(600);
    let expected: String = long_text.chars().take(512).collect();
    Mock::given(method("POST"))
        .and(path("/some/model"))
        .and(body_json(json!({"inputs": expected})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            {"label": "POSITIVE", "score": 0.7}
        ]])))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = keyword_analyzer(Some(model_for(&server).await));
    let sentiment = analyzer.analyze(Some(&long_text)).await;
    assert_eq!(sentiment.method, SentimentMethod::Model);
}
