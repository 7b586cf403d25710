//! Contract tests for the Gemini-backed classifier, against a local mock of
//! the `generateContent` endpoint.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use untangle::ClassifierError;
use untangle::classifier::GeminiClassifier;
use untangle::model::Domain;

const MODEL: &str = "gemini-2.5-flash";

fn classifier(api_base: &str) -> GeminiClassifier {
    GeminiClassifier::new(Some("test-key"), MODEL, 0.7).with_api_base(api_base)
}

fn envelope(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

const VALID_PAYLOAD: &str = r#"{
    "classification": {"my_domain": 20, "others_domain": 50, "life_domain": 30},
    "dominant_domain": "別人的事",
    "one_sentence_reason": "80%係外部噪音。",
    "recommended_action": "今晚早啲瞓。",
    "optional_reframe": "你已經做得好好。"
}"#;

#[tokio::test]
async fn valid_response_parses_the_full_contract() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(VALID_PAYLOAD)))
        .mount(&server)
        .await;

    let result = classifier(&server.uri()).classify("老細又改需求").await.unwrap();

    assert_eq!(result.dominant_domain, Domain::Others);
    assert_eq!(result.classification.my_domain, 20);
    assert_eq!(result.classification.others_domain, 50);
    assert_eq!(result.classification.life_domain, 30);
    assert_eq!(result.one_sentence_reason, "80%係外部噪音。");
    assert_eq!(result.recommended_action, "今晚早啲瞓。");
    assert_eq!(result.optional_reframe, "你已經做得好好。");
    // Client-side fields are never set by the classifier.
    assert!(result.timestamp.is_none());
    assert!(result.original_input.is_none());
}

#[tokio::test]
async fn request_declares_structured_output_and_system_instruction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(VALID_PAYLOAD)))
        .expect(1)
        .mount(&server)
        .await;

    classifier(&server.uri()).classify("同事卸膊").await.unwrap();
}

#[tokio::test]
async fn missing_text_payload_is_an_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [] } }]
        })))
        .mount(&server)
        .await;

    let err = classifier(&server.uri()).classify("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::EmptyResponse));
}

#[tokio::test]
async fn non_json_text_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope("I'd rather not classify that.")),
        )
        .mount(&server)
        .await;

    let err = classifier(&server.uri()).classify("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::Malformed(_)));
}

#[tokio::test]
async fn out_of_set_dominant_domain_is_malformed() {
    let server = MockServer::start().await;
    let payload = VALID_PAYLOAD.replace("別人的事", "unknown");
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&payload)))
        .mount(&server)
        .await;

    let err = classifier(&server.uri()).classify("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::Malformed(_)));
}

#[tokio::test]
async fn extra_fields_in_the_payload_are_malformed() {
    let server = MockServer::start().await;
    let payload = VALID_PAYLOAD.replacen('{', "{\n    \"confidence\": 0.9,", 1);
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(&payload)))
        .mount(&server)
        .await;

    let err = classifier(&server.uri()).classify("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::Malformed(_)));
}

#[tokio::test]
async fn server_error_surfaces_as_request_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = classifier(&server.uri()).classify("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::Request(_)));
}

#[tokio::test]
async fn missing_api_key_fails_before_any_network_call() {
    if std::env::var("GEMINI_API_KEY").is_ok() || std::env::var("GOOGLE_API_KEY").is_ok() {
        // A real key in the environment would be picked up by design.
        return;
    }

    let classifier =
        GeminiClassifier::new(None, MODEL, 0.7).with_api_base("http://127.0.0.1:9");
    let err = classifier.classify("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::MissingApiKey));
}
