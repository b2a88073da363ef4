use crate::dtos::WelcomeMessage;
use axum::Json;

pub const WELCOME_MESSAGE: &str =
    "Welcome to Story Generator API. Use /openai/ endpoint to generate stories.";

/// Welcome message
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Static welcome message", body = WelcomeMessage)
    ),
    tag = "Story"
)]
pub async fn root() -> Json<WelcomeMessage> {
    Json(WelcomeMessage {
        message: WELCOME_MESSAGE.to_string(),
    })
}
