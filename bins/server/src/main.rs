//! Atelier API Server
//!
//! Main entry point for the portfolio content backend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier_api::{AppState, create_router};
use atelier_core::storage::{BlobStore, StorageConfig, StorageProvider};
use atelier_db::connect;
use atelier_shared::{AppConfig, StorageSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Build the blob store
    let storage = BlobStore::from_config(storage_config(&config.storage))
        .context("failed to initialize blob storage")?;
    info!(provider = storage.provider_name(), "Blob storage configured");

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        storage: Arc::new(storage),
    };

    // Create router; local storage also serves the upload directory
    let local_media_root =
        (config.storage.kind != "s3").then_some(config.storage.local_root.as_str());
    let app = create_router(
        state,
        &config.server.cors_origin,
        config.server.max_upload_bytes,
        local_media_root,
    );

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Map environment settings onto a storage provider.
fn storage_config(settings: &StorageSettings) -> StorageConfig {
    let provider = if settings.kind == "s3" {
        StorageProvider::s3(
            &settings.endpoint,
            &settings.bucket,
            &settings.access_key_id,
            &settings.secret_access_key,
            &settings.region,
        )
    } else {
        StorageProvider::local_fs(&settings.local_root)
    };
    StorageConfig::new(provider, &settings.public_base_url)
}
