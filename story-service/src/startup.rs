//! Application startup and lifecycle management.

use crate::config::StoryConfig;
use crate::dtos;
use crate::handlers;
use crate::services::providers::openai::{OpenAiProviderConfig, OpenAiTextProvider};
use crate::services::providers::{GenerationParams, TextProvider};
use crate::services::{StoryGenerator, STORY_PROMPT};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{request_id, request_id_middleware},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Story Generator API",
        description = "An API that generates stories using OpenAI's GPT-4",
        version = "1.0.0"
    ),
    paths(
        handlers::root::root,
        handlers::story::generate_story,
        handlers::health::health_check,
        handlers::metrics::metrics,
    ),
    components(schemas(
        dtos::ChatInput,
        dtos::ChatOutput,
        dtos::WelcomeMessage,
        dtos::HealthResponse,
        dtos::ErrorResponse,
    )),
    tags(
        (name = "Story", description = "Story generation"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: StoryGenerator,
    pub service_name: Arc<str>,
}

pub fn build_router(state: AppState, swagger_enabled: bool) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::root::root))
        .route("/openai/", post(handlers::story::generate_story))
        .route("/openai", post(handlers::story::generate_story))
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::metrics));

    if swagger_enabled {
        app = app.merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()));
    }

    app.fallback(not_found)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    request_id = %request_id(request),
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
}

async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not Found"))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application, wiring the OpenAI provider when a key is configured.
    pub async fn build(config: StoryConfig) -> Result<Self, AppError> {
        let provider: Option<Arc<dyn TextProvider>> = match &config.openai.api_key {
            Some(api_key) => {
                let provider = OpenAiTextProvider::new(OpenAiProviderConfig {
                    api_key: api_key.clone(),
                    base_url: config.openai.base_url.clone(),
                    timeout: config.openai.timeout(),
                })?;
                tracing::info!(
                    model = %config.openai.model,
                    base_url = %config.openai.base_url,
                    "Initialized OpenAI text provider"
                );
                Some(Arc::new(provider) as Arc<dyn TextProvider>)
            }
            None => {
                tracing::warn!(
                    "OPENAI_API_KEY is not set; story generation will return a configuration error"
                );
                None
            }
        };

        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an explicit provider (`None` = no credential).
    pub async fn build_with_provider(
        config: StoryConfig,
        provider: Option<Arc<dyn TextProvider>>,
    ) -> Result<Self, AppError> {
        let params = GenerationParams {
            model: config.openai.model.clone(),
            temperature: Some(config.openai.temperature),
        };

        let state = AppState {
            generator: StoryGenerator::new(STORY_PROMPT, provider, params),
            service_name: Arc::from(config.service_name.as_str()),
        };
        let router = build_router(state, config.swagger_enabled);

        // Port 0 binds a random port, used by tests
        let address = config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            template_variables = ?STORY_PROMPT.input_variables(),
            "Story service bound"
        );

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
