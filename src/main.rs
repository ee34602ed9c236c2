mod api;
mod app;
mod config;
mod domain;
mod error;
mod logging;
mod middleware;
mod routes;
mod services;
mod views;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::sync::Arc;

use services::{GeminiClient, StrategyGenerator};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        model = %settings.gemini_model,
        "Starting StratAI Suite"
    );

    // Create Gemini client
    let gemini = GeminiClient::new(
        &settings.gemini_base_url,
        &settings.gemini_api_key,
        &settings.gemini_model,
        settings.ai_timeout_seconds,
    )?;
    let generator = StrategyGenerator::new(Arc::new(gemini), &settings);

    // Optionally check model availability (non-blocking)
    tokio::spawn({
        let generator = generator.clone();
        async move {
            match generator.health_check().await {
                Ok(()) => tracing::info!("Gemini model is reachable"),
                Err(e) => tracing::warn!(error = %e, "Gemini health check failed - requests may fail"),
            }
        }
    });

    // Create application state
    let state = app::AppState::new(settings.clone(), generator);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
