#![warn(unused_extern_crates)]

use anyhow::{Context, Result};
use dotenv::dotenv;
use recommender::{MatchingEngine, build_provider};
use std::sync::Arc;
use tna::{AppState, config, create_router, store::JsonFileStore};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    utils::tracing::run_with_tracing(run).await
}

async fn run() -> Result<()> {
    info!("TNA service starting up");

    let config = config::load();

    let provider =
        build_provider(&config.embedder).context("Failed to initialize embedding provider")?;

    let mut engine = MatchingEngine::new(provider);
    if let Some(timeout) = config.recommendation.embed_timeout() {
        engine = engine.with_embed_timeout(timeout);
    }

    let store = Arc::new(JsonFileStore::new(config.storage.path.clone()));
    let state = AppState::new(
        store,
        engine,
        config.catalog.skills.clone(),
        config.recommendation.top_k_per_objective,
    );

    let app = create_router(state, &config.server.cors_origins);

    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    info!(address = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Application shutting down");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
