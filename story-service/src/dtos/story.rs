use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /openai/`. Any string is accepted, including an empty one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatInput {
    #[schema(example = "a lighthouse keeper who befriends a whale")]
    pub topic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatOutput {
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WelcomeMessage {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    pub service: String,
    pub version: String,
    /// `configured` or `not_configured`, depending on the provider credential.
    pub provider: String,
}
