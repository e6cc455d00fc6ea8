//! Shared application state.

use crate::auth::JwtService;
use clipstore_core::Config;
use clipstore_db::VideoStore;
use clipstore_media::VideoEngine;
use clipstore_storage::Storage;
use std::sync::Arc;

/// Everything the handlers need, behind trait objects so tests can substitute
/// in-process doubles for the database, object store and ffmpeg.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jwt: JwtService,
    pub videos: Arc<dyn VideoStore>,
    pub storage: Arc<dyn Storage>,
    pub engine: Arc<dyn VideoEngine>,
}

impl AppState {
    pub fn new(
        config: Config,
        videos: Arc<dyn VideoStore>,
        storage: Arc<dyn Storage>,
        engine: Arc<dyn VideoEngine>,
    ) -> Self {
        let jwt = JwtService::new(config.jwt_secret(), config.jwt_expiry_hours());
        Self {
            config: Arc::new(config),
            jwt,
            videos,
            storage,
            engine,
        }
    }
}
