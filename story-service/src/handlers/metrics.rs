use axum::{http::header, response::IntoResponse};

/// Prometheus metrics
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Metrics in Prometheus text format", body = String, content_type = "text/plain")
    ),
    tag = "Observability"
)]
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::services::metrics::get_metrics(),
    )
}
