//! End-to-end tests: the real application on a random port, with a local
//! stand-in for the OpenAI API.

mod common;

use common::{test_config, TestApp, TEST_API_KEY};
use serde_json::json;
use std::sync::Arc;
use story_service::services::providers::mock::MockTextProvider;
use story_service::services::providers::TextProvider;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::spawn(test_config(Some(TEST_API_KEY), "http://127.0.0.1:1")).await;

    let response = app
        .client()
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "story-service-test");
    assert_eq!(body["provider"], "configured");
}

#[tokio::test]
async fn welcome_route_is_served() {
    let app = TestApp::spawn(test_config(None, "http://127.0.0.1:1")).await;

    let response = app
        .client()
        .get(format!("{}/", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Welcome to Story Generator API. Use /openai/ endpoint to generate stories."
    );
}

#[tokio::test]
async fn generates_story_through_openai_api() {
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": { "role": "assistant", "content": "The comet sang as it passed." },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 9, "completion_tokens": 7 }
        })))
        .expect(1)
        .mount(&openai)
        .await;

    let app = TestApp::spawn(test_config(Some(TEST_API_KEY), &openai.uri())).await;

    let response = app.generate(json!({ "topic": "a singing comet" })).await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "response": "The comet sang as it passed." }));

    let requests = openai.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        sent["messages"][0]["content"],
        "Tell me a long story about a singing comet"
    );
    assert_eq!(sent["model"], "gpt-4");
}

#[tokio::test]
async fn missing_api_key_makes_no_outbound_call() {
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&openai)
        .await;

    let app = TestApp::spawn(test_config(None, &openai.uri())).await;

    let response = app.generate(json!({ "topic": "anything" })).await;

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "OpenAI API key not configured");
}

#[tokio::test]
async fn provider_error_is_returned_as_detail() {
    let openai = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "message": "The server had an error while processing your request" }
        })))
        .expect(1)
        .mount(&openai)
        .await;

    let app = TestApp::spawn(test_config(Some(TEST_API_KEY), &openai.uri())).await;

    let response = app.generate(json!({ "topic": "storms" })).await;

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("OpenAI API error 500"), "{}", detail);
    assert!(
        detail.contains("The server had an error while processing your request"),
        "{}",
        detail
    );
}

#[tokio::test]
async fn malformed_topic_is_rejected_over_http() {
    let mock = Arc::new(MockTextProvider::new());
    let app = TestApp::spawn_with_provider(
        test_config(Some(TEST_API_KEY), "http://127.0.0.1:1"),
        Some(mock.clone() as Arc<dyn TextProvider>),
    )
    .await;

    let response = app.generate(json!({ "topic": 123 })).await;

    assert_eq!(response.status(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["detail"].is_string());
    assert_eq!(mock.call_count().await, 0);
}
