//! LLM provider abstractions and implementations.
//!
//! Generation goes through the [`TextProvider`] trait so the OpenAI backend
//! can be swapped for the in-process mock in tests.

pub mod mock;
pub mod openai;

use async_trait::async_trait;
use serde::Serialize;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("{0}")]
    ApiError(String),

    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(msg) => AppError::ConfigError(anyhow::anyhow!(msg)),
            other => AppError::ProviderError(other.to_string()),
        }
    }
}

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A fully formatted message, ready to send to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Parameters applied to every generation request.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: Option<f32>,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Other,
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub finish_reason: FinishReason,
}

/// Trait for chat-style text generation backends.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Short identifier used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Run one completion over `messages`.
    async fn generate(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;
}
