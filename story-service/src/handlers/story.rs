use crate::dtos::{ChatInput, ChatOutput};
use crate::startup::AppState;
use crate::utils::JsonBody;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// Generate a story about a topic
#[utoipa::path(
    post,
    path = "/openai/",
    request_body = ChatInput,
    responses(
        (status = 200, description = "Generated story", body = ChatOutput),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 422, description = "Topic missing or not a string", body = ErrorResponse),
        (status = 500, description = "Missing API key or provider failure", body = ErrorResponse)
    ),
    tag = "Story"
)]
pub async fn generate_story(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ChatInput>,
) -> Result<Json<ChatOutput>, AppError> {
    let response = state.generator.generate(&input.topic).await?;
    Ok(Json(ChatOutput { response }))
}
