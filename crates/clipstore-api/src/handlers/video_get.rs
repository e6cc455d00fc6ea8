//! Read side of the video record: clients poll this for the published locator.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use clipstore_core::models::VideoResponse;
use clipstore_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
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

    Ok(Json(video.into()))
}
