use service_core::observability::init_tracing;
use story_service::config::StoryConfig;
use story_service::services::metrics::init_metrics;
use story_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StoryConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    )?;

    init_metrics()?;

    if config.is_prod() && config.swagger_enabled {
        tracing::warn!("Swagger UI is publicly accessible in production; set ENABLE_SWAGGER=false to hide it");
    }

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    tracing::info!(port = application.port(), "Starting story-service");
    application.run_until_stopped().await?;

    Ok(())
}
