use crate::dtos::HealthResponse;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// Service health check
///
/// Does not call the provider; only reports whether a credential is loaded.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "Observability"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider = if state.generator.is_configured() {
        "configured"
    } else {
        "not_configured"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.service_name.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: provider.to_string(),
    })
}
