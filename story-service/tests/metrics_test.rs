//! Prometheus exposition of request and generation metrics.
//!
//! The recorder is process-global, so this binary installs it exactly once.

mod common;

use axum::http::StatusCode;
use common::{get, post_json, router_with};
use http_body_util::BodyExt;
use std::sync::{Arc, Once};
use story_service::services::metrics::init_metrics;
use story_service::services::providers::mock::MockTextProvider;
use tower::ServiceExt;

static INIT: Once = Once::new();

fn install_recorder() {
    INIT.call_once(|| init_metrics().expect("Failed to install metrics recorder"));
}

#[tokio::test]
async fn metrics_endpoint_reports_generation_outcomes() {
    install_recorder();

    let ok = router_with(Some(Arc::new(MockTextProvider::new())));
    let response = ok
        .clone()
        .oneshot(post_json("/openai/", r#"{"topic": "lighthouses"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let failing = router_with(Some(Arc::new(MockTextProvider::failing("upstream down"))));
    let response = failing
        .oneshot(post_json("/openai/", r#"{"topic": "lighthouses"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let unconfigured = router_with(None);
    let response = unconfigured
        .oneshot(post_json("/openai/", r#"{"topic": "lighthouses"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = ok.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(
        text.contains(r#"story_generations_total{outcome="success"} 1"#),
        "{}",
        text
    );
    assert!(
        text.contains(r#"story_generations_total{outcome="error"} 1"#),
        "{}",
        text
    );
    assert!(
        text.contains(r#"story_generations_total{outcome="not_configured"} 1"#),
        "{}",
        text
    );
    assert!(text.contains("story_generation_duration_seconds"), "{}", text);
    assert!(text.contains("http_requests_total"), "{}", text);
    assert!(!text.contains("not initialized"), "{}", text);
}
