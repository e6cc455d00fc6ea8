//! Configuration module
//!
//! All configuration is read once at process start via `Config::from_env` and
//! is immutable afterwards. Handlers receive it through the application state.

use std::env;
use std::path::PathBuf;

use crate::storage_types::StorageBackend;

const JWT_EXPIRY_HOURS: i64 = 24;
const MAX_VIDEO_SIZE_MB: usize = 1024;

/// Application configuration for the ingestion service.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    cors_origins: Vec<String>,
    environment: String,
    database_url: String,
    db_max_connections: u32,
    jwt_secret: String,
    jwt_expiry_hours: i64,
    // Upload limits and validation
    max_video_size_bytes: usize,
    video_allowed_content_types: Vec<String>,
    upload_scratch_dir: PathBuf,
    // External media tools
    ffmpeg_path: String,
    ffprobe_path: String,
    // Object storage
    storage_backend: Option<StorageBackend>,
    s3_bucket: Option<String>,
    s3_region: Option<String>,
    s3_endpoint: Option<String>,
    local_storage_path: Option<String>,
    local_storage_base_url: Option<String>,
    // Public base under which published objects are reachable (e.g. a CDN distribution)
    distribution_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let storage_backend =
            env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|s| match s.to_lowercase().as_str() {
                    "s3" => Some(StorageBackend::S3),
                    "local" => Some(StorageBackend::Local),
                    _ => None,
                });

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .unwrap_or(20),
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| JWT_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(JWT_EXPIRY_HOURS),
            max_video_size_bytes: env::var("MAX_VIDEO_SIZE_MB")
                .unwrap_or_else(|_| MAX_VIDEO_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_VIDEO_SIZE_MB)
                * 1024
                * 1024,
            video_allowed_content_types: env::var("VIDEO_ALLOWED_CONTENT_TYPES")
                .unwrap_or_else(|_| "video/mp4".to_string())
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .collect(),
            upload_scratch_dir: env::var("UPLOAD_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| env::temp_dir()),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION").ok().or(env::var("AWS_REGION").ok()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            distribution_base_url: env::var("DISTRIBUTION_BASE_URL")
                .map_err(|_| anyhow::anyhow!("DISTRIBUTION_BASE_URL must be set"))?
                .trim_end_matches('/')
                .to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }
        if self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_VIDEO_SIZE_MB must be greater than 0"));
        }
        if self.video_allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "VIDEO_ALLOWED_CONTENT_TYPES must not be empty"
            ));
        }
        match self.storage_backend.unwrap_or(StorageBackend::S3) {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!("S3_BUCKET must be set for the s3 backend"));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set for the local backend"
                    ));
                }
            }
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn jwt_expiry_hours(&self) -> i64 {
        self.jwt_expiry_hours
    }

    pub fn max_video_size_bytes(&self) -> usize {
        self.max_video_size_bytes
    }

    pub fn video_allowed_content_types(&self) -> &[String] {
        &self.video_allowed_content_types
    }

    pub fn upload_scratch_dir(&self) -> &std::path::Path {
        &self.upload_scratch_dir
    }

    pub fn ffmpeg_path(&self) -> &str {
        &self.ffmpeg_path
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.ffprobe_path
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.local_storage_base_url.as_deref()
    }

    pub fn distribution_base_url(&self) -> &str {
        &self.distribution_base_url
    }

    /// Construct a configuration directly, bypassing the environment.
    /// Intended for tests and embedded setups.
    #[allow(clippy::too_many_arguments)]
    pub fn for_tests(
        jwt_secret: String,
        max_video_size_bytes: usize,
        video_allowed_content_types: Vec<String>,
        upload_scratch_dir: PathBuf,
        distribution_base_url: String,
    ) -> Self {
        Config {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            database_url: String::new(),
            db_max_connections: 5,
            jwt_secret,
            jwt_expiry_hours: JWT_EXPIRY_HOURS,
            max_video_size_bytes,
            video_allowed_content_types,
            upload_scratch_dir,
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            storage_backend: Some(StorageBackend::Local),
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: None,
            local_storage_base_url: None,
            distribution_base_url: distribution_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::for_tests(
            "0123456789abcdef0123456789abcdef".to_string(),
            8 * 1024 * 1024,
            vec!["video/mp4".to_string()],
            std::env::temp_dir(),
            "https://cdn.example.com/".to_string(),
        )
    }

    #[test]
    fn test_distribution_base_has_no_trailing_slash() {
        let config = test_config();
        assert_eq!(config.distribution_base_url(), "https://cdn.example.com");
    }

    #[test]
    fn test_validate_requires_local_path_for_local_backend() {
        let mut config = test_config();
        assert!(config.validate().is_err());
        config.local_storage_path = Some("/tmp/clipstore".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_jwt_secret() {
        let mut config = test_config();
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }
}
