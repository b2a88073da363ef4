use crate::services::metrics::record_generation;
use crate::services::prompt::PromptTemplate;
use crate::services::providers::{FinishReason, GenerationParams, TextProvider};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;

pub const MISSING_API_KEY: &str = "OpenAI API key not configured";

/// Fills the prompt template and runs it through the provider.
///
/// Holds only read-only state, so one instance is shared by every request.
#[derive(Clone)]
pub struct StoryGenerator {
    template: PromptTemplate,
    provider: Option<Arc<dyn TextProvider>>,
    params: GenerationParams,
}

impl StoryGenerator {
    /// `provider` is `None` when no credential was configured.
    pub fn new(
        template: PromptTemplate,
        provider: Option<Arc<dyn TextProvider>>,
        params: GenerationParams,
    ) -> Self {
        Self {
            template,
            provider,
            params,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    #[tracing::instrument(skip_all, fields(topic_len = topic.len(), model = %self.params.model))]
    pub async fn generate(&self, topic: &str) -> Result<String, AppError> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            record_generation("not_configured", None);
            AppError::ConfigError(anyhow::anyhow!(MISSING_API_KEY))
        })?;

        let messages = self.template.format_messages(topic);
        let start = Instant::now();

        let response = match provider.generate(&messages, &self.params).await {
            Ok(response) => response,
            Err(e) => {
                record_generation("error", Some(start.elapsed()));
                tracing::error!(provider = provider.name(), error = %e, "Story generation failed");
                return Err(e.into());
            }
        };

        record_generation("success", Some(start.elapsed()));

        if response.finish_reason != FinishReason::Complete {
            tracing::warn!(
                finish_reason = ?response.finish_reason,
                "Provider stopped before completing the story"
            );
        }

        tracing::info!(
            provider = provider.name(),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            duration_ms = start.elapsed().as_millis() as u64,
            "Story generated"
        );

        Ok(response.text)
    }
}
