//! Shared helpers for story-service integration tests.

#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use secrecy::Secret;
use service_core::config::Config;
use std::sync::Arc;
use std::time::Duration;
use story_service::config::{Environment, OpenAiConfig, StoryConfig};
use story_service::services::providers::mock::MockTextProvider;
use story_service::services::providers::{GenerationParams, TextProvider};
use story_service::services::{StoryGenerator, STORY_PROMPT};
use story_service::startup::{build_router, AppState, Application};

pub const TEST_API_KEY: &str = "sk-test-key";

/// Config bound to an ephemeral local port, pointing at `base_url` for the provider.
pub fn test_config(api_key: Option<&str>, base_url: &str) -> StoryConfig {
    StoryConfig {
        common: Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        environment: Environment::Dev,
        service_name: "story-service-test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        openai: OpenAiConfig {
            api_key: api_key.map(|k| Secret::new(k.to_string())),
            base_url: base_url.to_string(),
            model: "gpt-4".to_string(),
            temperature: 0.7,
            timeout_secs: Some(5),
        },
        swagger_enabled: true,
    }
}

/// Router wired to `provider`, without binding a socket.
pub fn router_with(provider: Option<Arc<MockTextProvider>>) -> Router {
    let provider = provider.map(|p| p as Arc<dyn TextProvider>);
    let state = AppState {
        generator: StoryGenerator::new(
            STORY_PROMPT,
            provider,
            GenerationParams {
                model: "gpt-4".to_string(),
                temperature: Some(0.7),
            },
        ),
        service_name: Arc::from("story-service-test"),
    };
    build_router(state, true)
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

/// A running application on a random port.
pub struct TestApp {
    pub address: String,
    client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(config: StoryConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build application");
        Self::serve(app).await
    }

    pub async fn spawn_with_provider(
        config: StoryConfig,
        provider: Option<Arc<dyn TextProvider>>,
    ) -> Self {
        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build application");
        Self::serve(app).await
    }

    async fn serve(app: Application) -> Self {
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            let _ = app.run_until_stopped().await;
        });

        Self {
            address,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap(),
        }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn generate(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/openai/", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
