/**
 * Server Initialization
 *
 * Builds the store and hashing pool from a [`ServerConfig`] and wires them
 * into the router.
 *
 * # Initialization Process
 *
 * 1. Create the password hasher (and its decoy hash)
 * 2. Connect to PostgreSQL and run migrations, or fall back to the
 *    in-memory store when no `DATABASE_URL` is configured
 * 3. Create the router
 *
 * A configured database that cannot be reached is a startup error. Only an
 * absent `DATABASE_URL` selects the in-memory store.
 */

use axum::Router;
use std::sync::Arc;
use thiserror::Error;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::store::{MemoryStore, PgStore, SharedStore, StoreError};

/// Startup failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid bcrypt cost: {0}")]
    Hasher(#[from] bcrypt::BcryptError),

    #[error("store initialization failed: {0}")]
    Store(#[from] StoreError),
}

/// Create the store named by the configuration
pub async fn create_store(config: &ServerConfig) -> Result<SharedStore, StoreError> {
    match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let store = PgStore::connect(url, &config.pool_settings()).await.map_err(|e| {
                tracing::error!("Failed to create database connection pool: {}", e);
                e
            })?;
            store.migrate().await?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set. Using the in-memory store; data will not survive a restart."
            );
            Ok(Arc::new(MemoryStore::with_reference_catalog()))
        }
    }
}

/// Build application state from configuration
pub async fn create_state(config: &ServerConfig) -> Result<AppState, InitError> {
    let hasher = PasswordHasher::new(config.bcrypt_cost, config.hash_workers)?;
    tracing::info!(
        cost = config.bcrypt_cost,
        workers = config.hash_workers,
        "Password hasher ready"
    );

    let store = create_store(config).await?;
    Ok(AppState::new(store, hasher))
}

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing repbook backend server");

    let state = create_state(config).await?;
    let app = create_router(state, config.request_timeout);

    tracing::info!("Router configured");
    Ok(app)
}
