//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod storage;

use crate::auth::jwt_rs256::{jwks_url_from_issuer, JwtServiceRs256};
use crate::state::AppState;
use anyhow::{Context, Result};
use shutter_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    // Initialize telemetry first
    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    // Setup storage and make sure both containers are usable
    let storage = storage::setup_storage(&config).await?;

    // Bearer-token validation against the external issuer, when enabled
    let jwt = if config.auth_enabled() {
        let issuer = config
            .jwt_issuer_uri()
            .context("JWT_ISSUER_URI is required when AUTH_ENABLED=true")?;
        tracing::info!(issuer = %issuer, "Request authentication enabled");
        Some(Arc::new(JwtServiceRs256::new(
            jwks_url_from_issuer(issuer),
            None,
        )))
    } else {
        tracing::info!("Request authentication disabled");
        None
    };

    let state = Arc::new(AppState {
        storage,
        config: config.clone(),
        jwt,
        is_production: config.is_production(),
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}
