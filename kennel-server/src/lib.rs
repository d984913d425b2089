pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use kennel_axum::{kennel, KennelApp};
use kennel_core::{DogStore, MemoryDogStore};
use kennel_sqlx::SqliteDogStore;

use crate::config::Settings;

/// Open the store named by `settings.database_url`.
pub async fn connect_store(settings: &Settings) -> Result<Arc<dyn DogStore>> {
    if settings.uses_memory_store() {
        tracing::warn!("using the in-memory dog store; records are lost on exit");
        return Ok(Arc::new(MemoryDogStore::new()));
    }

    let store = SqliteDogStore::connect_and_migrate(&settings.database_url)
        .await
        .with_context(|| format!("failed to open dog store at {}", settings.database_url))?;

    tracing::info!(url = %settings.database_url, "dog store ready");
    Ok(Arc::new(store))
}

pub async fn build(settings: &Settings) -> Result<KennelApp> {
    let store = connect_store(settings).await?;
    Ok(kennel(store))
}
