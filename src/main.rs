use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use sticker_generator::{app, config::Settings, openai::OpenAiClient, routes::{AppState, GENERATE_STICKER_PATH}};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let settings = Settings::from_env();
    if settings.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; sticker requests will fail until it is configured");
    }
    tracing::info!("Using API key: {} model: {} base: {}", settings.masked_api_key(), settings.model, settings.api_base);

    let generator = Arc::new(OpenAiClient::new(&settings));
    let port = settings.port;
    let router = app(AppState::new(settings, generator));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, path = GENERATE_STICKER_PATH, "Starting server");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
