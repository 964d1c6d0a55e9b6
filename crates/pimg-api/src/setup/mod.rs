//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use pimg_core::Config;
use pimg_storage::{create_store, GitHubClient};
use std::sync::Arc;

/// Build state for `config`: GitHub client plus the store for the configured strategy.
pub fn build_state(config: Config) -> Result<Arc<AppState>> {
    let github =
        GitHubClient::from_config(&config.github).context("Failed to create GitHub client")?;
    let store = create_store(&config, github.clone());
    Ok(Arc::new(AppState::new(config, store, github)))
}

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production(), config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        storage_strategy = %config.storage_strategy(),
        "Configuration loaded and validated successfully"
    );

    let state = build_state(config)?;
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
