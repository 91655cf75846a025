// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pollution-Cities API Server
//!
//! Serves pages of the most polluted cities per country, each enriched with
//! a short description of the city.

use pollution_cities::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        pollution_api = %config.pollution_api_url,
        summary_api = %config.summary_api_url,
        token_ttl_secs = config.token_ttl.as_secs(),
        description_ttl_secs = config.description_ttl.as_secs(),
        enrichment_concurrency = config.enrichment_concurrency,
        "Starting Pollution-Cities API"
    );

    // Build shared state (HTTP client, token and description caches)
    let state = Arc::new(AppState::new(config.clone())?);
    tracing::info!("Caches initialized");

    // Build router
    let app = pollution_cities::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pollution_cities=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
