use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem storage implementation
///
/// Used for development and tests. The content type is not persisted; a static
/// file server in front of the base directory is expected to infer it from the
/// file extension.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for published files
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:3000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Convert a storage key to a filesystem path, rejecting traversal.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(self.base_path.join(key))
    }

    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put_file(
        &self,
        key: &str,
        _content_type: &str,
        path: &Path,
    ) -> StorageResult<String> {
        let dest = self.key_to_path(key)?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }

        let bytes_copied = fs::copy(path, &dest)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        tracing::info!(
            key = %key,
            size_bytes = bytes_copied,
            "Published object to local storage"
        );

        Ok(self.generate_url(key))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    async fn storage(dir: &Path) -> LocalStorage {
        LocalStorage::new(dir, "http://localhost:3000/media/".to_string())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_put_file_copies_and_returns_locator() {
        let base = tempfile::tempdir().unwrap();
        let storage = storage(base.path()).await;

        let mut src = tempfile::NamedTempFile::new().unwrap();
        src.write_all(b"not a real mp4").unwrap();

        let locator = storage
            .put_file("landscape/abc.mp4", "video/mp4", src.path())
            .await
            .unwrap();

        assert_eq!(locator, "http://localhost:3000/media/landscape/abc.mp4");
        let published = base.path().join("landscape/abc.mp4");
        assert_eq!(fs::read(&published).await.unwrap(), b"not a real mp4");
    }

    #[tokio::test]
    async fn test_exists() {
        let base = tempfile::tempdir().unwrap();
        let storage = storage(base.path()).await;

        let mut src = tempfile::NamedTempFile::new().unwrap();
        src.write_all(b"x").unwrap();
        storage
            .put_file("other/y.mp4", "video/mp4", src.path())
            .await
            .unwrap();

        assert!(storage.exists("other/y.mp4").await.unwrap());
        assert!(!storage.exists("other/missing.mp4").await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let base = tempfile::tempdir().unwrap();
        let storage = storage(base.path()).await;

        let src = tempfile::NamedTempFile::new().unwrap();
        let result = storage
            .put_file("../escape.mp4", "video/mp4", src.path())
            .await;

        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
