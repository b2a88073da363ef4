//! Mock provider for testing.
//!
//! Records every prompt it receives so tests can assert on call counts and
//! on the formatted template.

use super::{
    ChatMessage, FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider,
};
use async_trait::async_trait;
use tokio::sync::Mutex;

enum Behavior {
    Echo,
    Fail(String),
    Disabled,
}

/// Mock text provider.
pub struct MockTextProvider {
    behavior: Behavior,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockTextProvider {
    /// Answers with `Mock story for: <last message content>`.
    pub fn new() -> Self {
        Self::with_behavior(Behavior::Echo)
    }

    /// Fails every call with an API error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(message.into()))
    }

    /// Fails every call as not configured.
    pub fn disabled() -> Self {
        Self::with_behavior(Behavior::Disabled)
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of `generate` calls received so far.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Messages of every call, in arrival order.
    pub async fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().await.clone()
    }
}

impl Default for MockTextProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        messages: &[ChatMessage],
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.lock().await.push(messages.to_vec());

        match &self.behavior {
            Behavior::Echo => {
                let prompt = messages
                    .last()
                    .map(|m| m.content.as_str())
                    .unwrap_or_default();

                Ok(ProviderResponse {
                    text: format!("Mock story for: {}", prompt),
                    input_tokens: (prompt.len() / 4) as u32,
                    output_tokens: 10,
                    finish_reason: FinishReason::Complete,
                })
            }
            Behavior::Fail(message) => Err(ProviderError::ApiError(message.clone())),
            Behavior::Disabled => Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            )),
        }
    }
}
