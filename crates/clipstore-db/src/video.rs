//! Video repository: reads video records and writes published locators.

use async_trait::async_trait;
use clipstore_core::models::Video;
use clipstore_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Access to the `videos` table.
///
/// The upload pipeline fetches a record to check ownership and, once the
/// processed object is durable in storage, writes the public locator back.
/// `video_url` is the only column it mutates.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Fetch a video record by id.
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Set the published locator for a video and return the updated record.
    /// Returns `AppError::NotFound` if the record no longer exists.
    async fn set_video_url(&self, id: Uuid, url: &str) -> Result<Video, AppError>;
}

/// Postgres implementation of [`VideoStore`].
#[derive(Clone)]
pub struct PgVideoStore {
    pool: PgPool,
}

impl PgVideoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    #[tracing::instrument(skip(self), fields(db.table = "videos"))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video: Option<Video> = sqlx::query_as::<Postgres, Video>(
            r#"
            SELECT id, user_id, title, video_url, created_at, updated_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(video)
    }

    #[tracing::instrument(skip(self, url), fields(db.table = "videos"))]
    async fn set_video_url(&self, id: Uuid, url: &str) -> Result<Video, AppError> {
        let video: Option<Video> = sqlx::query_as::<Postgres, Video>(
            r#"
            UPDATE videos
            SET video_url = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, video_url, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        video.ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))
    }
}
