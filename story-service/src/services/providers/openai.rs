//! OpenAI chat completions provider.
//!
//! Talks to any endpoint that implements `POST {base_url}/chat/completions`
//! with bearer authentication.

use super::{
    ChatMessage, FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI provider configuration.
#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
    /// No timeout when `None`; a slow completion holds the request open.
    pub timeout: Option<Duration>,
}

/// OpenAI text provider.
pub struct OpenAiTextProvider {
    config: OpenAiProviderConfig,
    client: Client,
}

impl OpenAiTextProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl TextProvider for OpenAiTextProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        let request = ChatCompletionRequest {
            model: &params.model,
            messages,
            temperature: params.temperature,
        };

        tracing::debug!(
            model = %params.model,
            message_count = messages.len(),
            "Sending request to OpenAI API"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = api_error_message(&error_text);

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited(message));
            }

            return Err(ProviderError::ApiError(format!(
                "OpenAI API error {}: {}",
                status, message
            )));
        }

        let api_response: ChatCompletionResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("response contained no choices".into()))?;

        let text = choice.message.content.ok_or_else(|| {
            ProviderError::InvalidResponse("response message has no content".into())
        })?;

        let finish_reason = match choice.finish_reason.as_deref() {
            Some("stop") | None => FinishReason::Complete,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            Some(_) => FinishReason::Other,
        };

        let usage = api_response.usage.unwrap_or_default();

        Ok(ProviderResponse {
            text,
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            finish_reason,
        })
    }
}

/// Pulls `error.message` out of an OpenAI error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}
