//! Integration tests for the completions API client against a mock server.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mantis::error::CompletionError;
use mantis::openai::{CompletionBackend, CompletionClient, DEFAULT_MODEL};

fn client_for(server: &MockServer) -> CompletionClient {
    CompletionClient::new(DEFAULT_MODEL).with_base_url(server.uri())
}

#[tokio::test]
async fn test_complete_returns_choice_texts_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "text": "feat: add hello\n" },
                { "text": " feat: add hello" },
                { "text": "fix: typo" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let texts = client_for(&server)
        .complete("sk-test", "prompt text", 3)
        .await
        .unwrap();

    // Raw texts come back untouched; trimming and dedup happen upstream.
    assert_eq!(texts, vec!["feat: add hello\n", " feat: add hello", "fix: typo"]);
}

#[tokio::test]
async fn test_complete_sends_fixed_sampling_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .and(body_partial_json(json!({
            "model": DEFAULT_MODEL,
            "prompt": "the staged diff",
            "n": 4,
            "temperature": 0.5,
            "top_p": 1.0,
            "max_tokens": 50,
            "frequency_penalty": 0.0,
            "presence_penalty": 0.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let texts = client_for(&server)
        .complete("sk-test", "the staged diff", 4)
        .await
        .unwrap();

    assert!(texts.is_empty());
}

#[tokio::test]
async fn test_429_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached", "type": "tokens" }
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).complete("sk-test", "prompt", 5).await;

    assert!(matches!(result, Err(CompletionError::RateLimited)));
}

#[tokio::test]
async fn test_other_http_errors_carry_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).complete("sk-bad", "prompt", 5).await;

    match result {
        Err(CompletionError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("Expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unparseable_error_body_falls_back_to_raw_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let result = client_for(&server).complete("sk-test", "prompt", 5).await;

    match result {
        Err(CompletionError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("Expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client_for(&server).complete("sk-test", "prompt", 5).await;

    assert!(matches!(result, Err(CompletionError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_choices_without_text_are_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "text": "feat: present" },
                { "text": null },
                {}
            ]
        })))
        .mount(&server)
        .await;

    let texts = client_for(&server)
        .complete("sk-test", "prompt", 3)
        .await
        .unwrap();

    assert_eq!(texts, vec!["feat: present"]);
}
