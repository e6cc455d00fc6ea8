//! Video upload and processing pipeline.
//!
//! `POST /api/videos/{video_id}/upload` accepts a multipart body with a single
//! `video` field, stages it to scratch space, probes and remuxes it, publishes
//! the processed file to storage and records the public locator on the video
//! record. Each step aborts the request on failure; scratch files are removed
//! on every path because their guards drop with the handler's scope.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{multipart::Field, Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use clipstore_core::models::VideoResponse;
use clipstore_core::AppError;
use clipstore_media::{Orientation, StagedFile};
use clipstore_storage::keys::publish_key;
use std::sync::Arc;
use uuid::Uuid;

/// Multipart field name carrying the video payload.
const VIDEO_FIELD: &str = "video";

/// Reduce a declared content type to its media type: parameters stripped,
/// ASCII-lowercased. `video/mp4; codecs="avc1.42E01E"` and `VIDEO/MP4` both
/// normalize to `video/mp4`.
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id)
        .map_err(|_| AppError::InvalidInput(format!("Invalid video id: {}", video_id)))?;

    let claims = state.jwt.authenticate(&headers)?;

    let video = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

    if video.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "Video belongs to a different user".to_string(),
        )
        .into());
    }

    let (staged, content_type) = receive_video(&state, &mut multipart).await?;
    tracing::debug!(
        video_id = %video_id,
        size_bytes = staged.bytes_written(),
        "Upload staged to scratch space"
    );

    let geometry = state.engine.probe(staged.path()).await?;
    let orientation = Orientation::classify(geometry.width, geometry.height);
    tracing::info!(
        video_id = %video_id,
        width = geometry.width,
        height = geometry.height,
        orientation = %orientation,
        "Probed video geometry"
    );

    // Remux output is a second scratch file; its guard removes it when this
    // function returns, published or not.
    let processed = state.engine.remux_faststart(staged.path()).await?;

    let key = publish_key(orientation.prefix(), &content_type);
    let locator = state
        .storage
        .put_file(&key, &content_type, &processed)
        .await?;

    let updated = match state.videos.set_video_url(video_id, &locator).await {
        Ok(video) => video,
        Err(e) => {
            // The object is already durable. Reconciliation happens out of
            // band; the request only reports the failure.
            tracing::warn!(
                video_id = %video_id,
                key = %key,
                locator = %locator,
                error = %e,
                "Video record update failed after publish; orphaned object left in storage"
            );
            return Err(e.into());
        }
    };

    tracing::info!(video_id = %video_id, locator = %locator, "Video published");

    Ok(Json(updated.into()))
}

/// Walk the multipart stream to the `video` field, validate its declared
/// content type and stage it to scratch space. Unknown fields before it are
/// drained and ignored; a stream that ends without the field is a bad request.
async fn receive_video(
    state: &AppState,
    multipart: &mut Multipart,
) -> Result<(StagedFile, String), HttpAppError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        // Reject on the declared content type before anything touches the disk.
        // Parameters (codecs, charset) and case do not affect the match; the
        // normalized media type is what gets published.
        let declared = field.content_type().ok_or_else(|| {
            AppError::UnsupportedMediaType("Missing content type on video field".to_string())
        })?;
        let content_type = media_type(declared);
        if !state
            .config
            .video_allowed_content_types()
            .iter()
            .any(|allowed| allowed == &content_type)
        {
            return Err(AppError::UnsupportedMediaType(format!(
                "Content type {} is not allowed",
                declared
            ))
            .into());
        }

        let staged = stage_upload(state, &mut field).await?;
        return Ok((staged, content_type));
    }

    Err(AppError::BadRequest(format!("Missing multipart field `{}`", VIDEO_FIELD)).into())
}

/// Stream the field into a scratch file, enforcing the size limit as bytes
/// arrive rather than after buffering the body.
async fn stage_upload(
    state: &AppState,
    field: &mut Field<'_>,
) -> Result<StagedFile, HttpAppError> {
    let max_bytes = state.config.max_video_size_bytes() as u64;
    let mut staged = StagedFile::create_in(state.config.upload_scratch_dir())
        .await
        .map_err(AppError::from)?;

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?
    {
        if staged.bytes_written() + chunk.len() as u64 > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Video exceeds the {} byte limit",
                max_bytes
            ))
            .into());
        }
        staged.write(&chunk).await.map_err(AppError::from)?;
    }

    if staged.bytes_written() == 0 {
        return Err(AppError::BadRequest("Empty video upload".to_string()).into());
    }

    staged.finish().await.map_err(AppError::from)?;
    Ok(staged)
}
