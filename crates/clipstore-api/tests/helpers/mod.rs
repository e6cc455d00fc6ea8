//! Test harness: an in-process server wired with doubles for the database,
//! object store and media tooling, all sharing the real traits.

// Each test binary uses a different subset of the helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use chrono::Utc;
use clipstore_api::setup::routes::setup_routes;
use clipstore_api::state::AppState;
use clipstore_core::models::Video;
use clipstore_core::{AppError, Config};
use clipstore_db::VideoStore;
use clipstore_media::{MediaError, StreamGeometry, VideoEngine};
use clipstore_storage::{LocalStorage, Storage, StorageError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::{TempDir, TempPath};
use uuid::Uuid;

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const CDN_BASE: &str = "http://cdn.test";

/// Video store backed by a hash map.
pub struct InMemoryVideoStore {
    videos: Mutex<HashMap<Uuid, Video>>,
    fail_updates: AtomicBool,
}

impl InMemoryVideoStore {
    pub fn new() -> Self {
        Self {
            videos: Mutex::new(HashMap::new()),
            fail_updates: AtomicBool::new(false),
        }
    }

    pub fn insert(&self, user_id: Uuid, title: &str) -> Video {
        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            user_id,
            title: title.to_string(),
            video_url: None,
            created_at: now,
            updated_at: now,
        };
        self.videos
            .lock()
            .unwrap()
            .insert(video.id, video.clone());
        video
    }

    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }

    pub fn stored_url(&self, id: Uuid) -> Option<String> {
        self.videos
            .lock()
            .unwrap()
            .get(&id)
            .and_then(|v| v.video_url.clone())
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoStore {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.lock().unwrap().get(&id).cloned())
    }

    async fn set_video_url(&self, id: Uuid, url: &str) -> Result<Video, AppError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }
        let mut videos = self.videos.lock().unwrap();
        let video = videos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;
        video.video_url = Some(url.to_string());
        video.updated_at = Utc::now();
        Ok(video.clone())
    }
}

/// What the stubbed probe reports.
#[derive(Clone, Copy)]
pub enum ProbeOutcome {
    Geometry(u32, u32),
    NoStreams,
    Fail,
}

/// Engine double: probe answers from configuration, remux copies the input to
/// a fresh temp file so downstream code still sees a real path.
pub struct StubEngine {
    probe: ProbeOutcome,
    fail_remux: bool,
}

impl StubEngine {
    pub fn new(probe: ProbeOutcome, fail_remux: bool) -> Self {
        Self { probe, fail_remux }
    }
}

#[async_trait]
impl VideoEngine for StubEngine {
    async fn probe(&self, path: &Path) -> Result<StreamGeometry, MediaError> {
        // The staged file must exist when the pipeline reaches the probe.
        tokio::fs::metadata(path).await?;
        match self.probe {
            ProbeOutcome::Geometry(width, height) => Ok(StreamGeometry { width, height }),
            ProbeOutcome::NoStreams => Err(MediaError::NoStreamsFound),
            ProbeOutcome::Fail => Err(MediaError::ProbeFailed("stub probe exit 1".to_string())),
        }
    }

    async fn remux_faststart(&self, input: &Path) -> Result<TempPath, MediaError> {
        if self.fail_remux {
            return Err(MediaError::RemuxFailed("stub remux exit 1".to_string()));
        }
        let tmp = tempfile::Builder::new()
            .prefix("clipstore-faststart-")
            .suffix(".mp4")
            .tempfile()?;
        let (_file, temp_path) = tmp.into_parts();
        tokio::fs::copy(input, &temp_path).await?;
        Ok(temp_path)
    }
}

/// Storage double whose writes always fail.
pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn put_file(
        &self,
        _key: &str,
        _content_type: &str,
        _path: &Path,
    ) -> Result<String, StorageError> {
        Err(StorageError::UploadFailed("injected failure".to_string()))
    }

    async fn exists(&self, _key: &str) -> Result<bool, StorageError> {
        Ok(false)
    }

    fn backend_type(&self) -> clipstore_core::StorageBackend {
        clipstore_core::StorageBackend::Local
    }
}

pub struct TestOptions {
    pub probe: ProbeOutcome,
    pub fail_remux: bool,
    pub fail_storage: bool,
    pub max_video_size_bytes: usize,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            probe: ProbeOutcome::Geometry(1920, 1080),
            fail_remux: false,
            fail_storage: false,
            max_video_size_bytes: 8 * 1024 * 1024,
        }
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub videos: Arc<InMemoryVideoStore>,
    scratch_dir: TempDir,
    storage_dir: TempDir,
}

impl TestApp {
    pub async fn spawn(opts: TestOptions) -> Self {
        let scratch_dir = tempfile::tempdir().unwrap();
        let storage_dir = tempfile::tempdir().unwrap();

        let config = Config::for_tests(
            JWT_SECRET.to_string(),
            opts.max_video_size_bytes,
            vec!["video/mp4".to_string()],
            scratch_dir.path().to_path_buf(),
            CDN_BASE.to_string(),
        );

        let videos = Arc::new(InMemoryVideoStore::new());
        let storage: Arc<dyn Storage> = if opts.fail_storage {
            Arc::new(FailingStorage)
        } else {
            Arc::new(
                LocalStorage::new(storage_dir.path(), CDN_BASE.to_string())
                    .await
                    .unwrap(),
            )
        };
        let engine = Arc::new(StubEngine::new(opts.probe, opts.fail_remux));

        let state = Arc::new(AppState::new(config.clone(), videos.clone(), storage, engine));
        let router = setup_routes(&config, state.clone()).unwrap();
        let server = TestServer::new(router).unwrap();

        TestApp {
            server,
            state,
            videos,
            scratch_dir,
            storage_dir,
        }
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.state.jwt.issue(user_id).unwrap()
    }

    /// Number of files left in the upload scratch directory.
    pub fn scratch_file_count(&self) -> usize {
        std::fs::read_dir(self.scratch_dir.path()).unwrap().count()
    }

    /// All keys currently published to the local storage backend.
    pub fn published_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        let base = self.storage_dir.path();
        for prefix_entry in std::fs::read_dir(base).unwrap().flatten() {
            let prefix = prefix_entry.file_name().to_string_lossy().to_string();
            for file_entry in std::fs::read_dir(prefix_entry.path()).unwrap().flatten() {
                keys.push(format!(
                    "{}/{}",
                    prefix,
                    file_entry.file_name().to_string_lossy()
                ));
            }
        }
        keys
    }
}

pub fn video_form(bytes: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "video",
        Part::bytes(bytes.to_vec())
            .file_name("clip.mp4")
            .mime_type("video/mp4"),
    )
}

pub fn form_with_content_type(bytes: &[u8], content_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "video",
        Part::bytes(bytes.to_vec())
            .file_name("clip.bin")
            .mime_type(content_type),
    )
}
