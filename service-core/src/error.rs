use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

/// Body of every error response: `{"detail": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "OpenAI API key not configured")]
    pub detail: String,
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidBody(rejection) => rejection.status(),
            AppError::InternalError(_)
            | AppError::ProviderError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message reported to the caller, without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            AppError::NotFound(err) | AppError::ConfigError(err) => err.to_string(),
            AppError::InvalidBody(rejection) => rejection.body_text(),
            AppError::InternalError(err) => format!("{:#}", err),
            AppError::ProviderError(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                detail: self.detail(),
            }),
        )
            .into_response()
    }
}
