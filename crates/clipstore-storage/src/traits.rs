//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// The upload handler works against this trait and never touches a concrete
/// backend directly.
///
/// **Key format:** keys are generated by [`crate::keys::publish_key`] and look
/// like `landscape/9b2f....mp4`. Backends must not rewrite them.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stream the file at `path` to the backend under `key`, tagging it with
    /// `content_type`. Returns the public locator for the published object.
    async fn put_file(
        &self,
        key: &str,
        content_type: &str,
        path: &Path,
    ) -> StorageResult<String>;

    /// Check whether an object exists under `key`.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the backend type (used in logs and health reporting).
    fn backend_type(&self) -> StorageBackend;
}
