//! Storage bootstrap.

use anyhow::{Context, Result};
use shutter_core::Config;
use shutter_storage::{create_storage, Storage};
use std::sync::Arc;

/// Create the storage backend and ensure both containers are usable.
///
/// Any failure here is fatal: the process must not serve traffic against a
/// backend it cannot reach.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    storage
        .ensure_container(config.raw_container())
        .await
        .with_context(|| format!("Raw container '{}' is not usable", config.raw_container()))?;
    storage
        .ensure_container(config.processed_container())
        .await
        .with_context(|| {
            format!(
                "Processed container '{}' is not usable",
                config.processed_container()
            )
        })?;

    tracing::info!(
        backend = %storage.backend_type(),
        raw_container = %config.raw_container(),
        processed_container = %config.processed_container(),
        "Storage initialized"
    );

    Ok(storage)
}
