//! Application wiring: telemetry, database, storage, routes, server.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use clipstore_core::Config;
use clipstore_db::{setup_database, PgVideoStore};
use clipstore_media::FfmpegService;
use std::sync::Arc;

/// Initialize the application: validate config, connect collaborators, build the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    let pool = setup_database(&config).await?;
    let videos = Arc::new(PgVideoStore::new(pool));

    let storage = clipstore_storage::create_storage(&config)
        .await
        .context("Failed to initialize storage backend")?;

    let engine = Arc::new(FfmpegService::new(
        config.ffprobe_path().to_string(),
        config.ffmpeg_path().to_string(),
        config.upload_scratch_dir().to_path_buf(),
    ));

    let state = Arc::new(AppState::new(config.clone(), videos, storage, engine));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
