//! Storage backend factory.

use crate::local::LocalStorage;
use crate::s3::S3Storage;
use crate::traits::{Storage, StorageError, StorageResult};
use clipstore_core::{Config, StorageBackend};
use std::sync::Arc;

/// Build the storage backend selected by configuration.
///
/// `Config::validate` has already checked that the backend-specific settings
/// are present, but missing values are still reported as `ConfigError` rather
/// than panicking.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let backend = config
        .storage_backend()
        .ok_or_else(|| StorageError::ConfigError("STORAGE_BACKEND is not set".to_string()))?;

    match backend {
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET is not set".to_string()))?;
            let region = config
                .s3_region()
                .ok_or_else(|| StorageError::ConfigError("S3_REGION is not set".to_string()))?;

            let storage = S3Storage::new(
                bucket.to_string(),
                region.to_string(),
                config.s3_endpoint().map(str::to_string),
                config.distribution_base_url().to_string(),
            )?;

            tracing::info!(bucket = %bucket, region = %region, "Using S3 storage backend");
            Ok(Arc::new(storage))
        }
        StorageBackend::Local => {
            let base_path = config.local_storage_path().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH is not set".to_string())
            })?;
            let base_url = config
                .local_storage_base_url()
                .unwrap_or(config.distribution_base_url());

            let storage = LocalStorage::new(base_path, base_url.to_string()).await?;

            tracing::info!(path = %base_path, "Using local storage backend");
            Ok(Arc::new(storage))
        }
    }
}
