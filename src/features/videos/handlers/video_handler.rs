use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, OptionalUser};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::policy::RequireModerate;
use crate::features::videos::dtos::{
    SubmitVideoDto, UpdateVideoDto, UpdateVideoStatusDto, VideoListQuery, VideoResponseDto,
};
use crate::features::videos::services::{LikeService, VideoService};
use crate::shared::types::{ApiResponse, Meta};

/// Shared state for the videos feature
#[derive(Clone)]
pub struct VideoState {
    pub video_service: Arc<VideoService>,
    pub like_service: Arc<LikeService>,
}

/// List videos visible to the caller
///
/// Anonymous and non-staff callers only ever see approved videos; staff may
/// filter by moderation status.
#[utoipa::path(
    get,
    path = "/api/videos",
    params(VideoListQuery),
    responses(
        (status = 200, description = "List of videos", body = ApiResponse<Vec<VideoResponseDto>>),
    ),
    tag = "videos"
)]
pub async fn list_videos(
    OptionalUser(caller): OptionalUser,
    State(state): State<VideoState>,
    Query(query): Query<VideoListQuery>,
) -> Result<Json<ApiResponse<Vec<VideoResponseDto>>>> {
    let videos = state.video_service.list(caller.as_ref(), &query).await?;
    let total = videos.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(videos),
        None,
        Some(Meta { total }),
    )))
}

/// Get a single video
#[utoipa::path(
    get,
    path = "/api/videos/{id}",
    params(
        ("id" = Uuid, Path, description = "Video id")
    ),
    responses(
        (status = 200, description = "Video found", body = ApiResponse<VideoResponseDto>),
        (status = 404, description = "Video not found or not visible to the caller")
    ),
    tag = "videos"
)]
pub async fn get_video(
    OptionalUser(caller): OptionalUser,
    State(state): State<VideoState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VideoResponseDto>>> {
    let video = state.video_service.get(caller.as_ref(), id).await?;
    Ok(Json(ApiResponse::success(Some(video), None, None)))
}

/// Submit a new video
#[utoipa::path(
    post,
    path = "/api/videos",
    request_body = SubmitVideoDto,
    responses(
        (status = 201, description = "Video submitted, pending moderation", body = ApiResponse<VideoResponseDto>),
        (status = 400, description = "Invalid link, duplicate link or bad category count"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "videos",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn submit_video(
    user: AuthenticatedUser,
    State(state): State<VideoState>,
    AppJson(dto): AppJson<SubmitVideoDto>,
) -> Result<(StatusCode, Json<ApiResponse<VideoResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let video = state.video_service.create(&user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(video), None, None)),
    ))
}

/// Edit a submission (owner or staff)
#[utoipa::path(
    patch,
    path = "/api/videos/{id}",
    params(
        ("id" = Uuid, Path, description = "Video id")
    ),
    request_body = UpdateVideoDto,
    responses(
        (status = 200, description = "Video updated", body = ApiResponse<VideoResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Video not found")
    ),
    tag = "videos",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_video(
    user: AuthenticatedUser,
    State(state): State<VideoState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateVideoDto>,
) -> Result<Json<ApiResponse<VideoResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let video = state.video_service.update(&user, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(video), None, None)))
}

/// Delete a submission (owner or staff)
#[utoipa::path(
    delete,
    path = "/api/videos/{id}",
    params(
        ("id" = Uuid, Path, description = "Video id")
    ),
    responses(
        (status = 200, description = "Video deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Video not found")
    ),
    tag = "videos",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_video(
    user: AuthenticatedUser,
    State(state): State<VideoState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.video_service.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Video deleted".to_string()),
        None,
    )))
}

/// Like a video
#[utoipa::path(
    post,
    path = "/api/videos/{id}/like",
    params(
        ("id" = Uuid, Path, description = "Video id")
    ),
    responses(
        (status = 200, description = "Video liked successfully"),
        (status = 404, description = "Video not found"),
        (status = 409, description = "Already liked")
    ),
    tag = "videos",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn like_video(
    user: AuthenticatedUser,
    State(state): State<VideoState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.like_service.like(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Video liked successfully".to_string()),
        None,
    )))
}

/// Remove a like from a video
#[utoipa::path(
    delete,
    path = "/api/videos/{id}/unlike",
    params(
        ("id" = Uuid, Path, description = "Video id")
    ),
    responses(
        (status = 200, description = "Video unliked successfully"),
        (status = 404, description = "Video not found"),
        (status = 409, description = "Not liked")
    ),
    tag = "videos",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn unlike_video(
    user: AuthenticatedUser,
    State(state): State<VideoState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.like_service.unlike(&user, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Video unliked successfully".to_string()),
        None,
    )))
}

/// Set the moderation status of a video (staff only)
#[utoipa::path(
    patch,
    path = "/api/videos/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Video id")
    ),
    request_body = UpdateVideoStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<VideoResponseDto>),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "Video not found")
    ),
    tag = "videos",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_video_status(
    RequireModerate(_user): RequireModerate,
    State(state): State<VideoState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateVideoStatusDto>,
) -> Result<Json<ApiResponse<VideoResponseDto>>> {
    let video = state.video_service.set_status(id, dto.status).await?;
    Ok(Json(ApiResponse::success(Some(video), None, None)))
}

/// List the caller's liked videos, most recently liked first
#[utoipa::path(
    get,
    path = "/api/liked-videos",
    responses(
        (status = 200, description = "Liked videos", body = ApiResponse<Vec<VideoResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "videos",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn liked_videos(
    user: AuthenticatedUser,
    State(state): State<VideoState>,
) -> Result<Json<ApiResponse<Vec<VideoResponseDto>>>> {
    let videos = state.video_service.liked_videos(user.id).await?;
    let total = videos.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(videos),
        None,
        Some(Meta { total }),
    )))
}

/// List the caller's own submissions, newest first
#[utoipa::path(
    get,
    path = "/api/user-videos",
    responses(
        (status = 200, description = "Own submissions", body = ApiResponse<Vec<VideoResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "videos",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn user_videos(
    user: AuthenticatedUser,
    State(state): State<VideoState>,
) -> Result<Json<ApiResponse<Vec<VideoResponseDto>>>> {
    let videos = state.video_service.user_videos(user.id).await?;
    let total = videos.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(videos),
        None,
        Some(Meta { total }),
    )))
}

/// Rewrite drifted like counters from the ledger (staff only)
#[utoipa::path(
    post,
    path = "/api/admin/reconcile-likes",
    responses(
        (status = 200, description = "Counters reconciled"),
        (status = 403, description = "Staff access required")
    ),
    tag = "videos",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn reconcile_likes(
    RequireModerate(_user): RequireModerate,
    State(state): State<VideoState>,
) -> Result<Json<ApiResponse<()>>> {
    let repaired = state.like_service.reconcile_like_counts().await?;
    Ok(Json(ApiResponse::success(
        None,
        Some(format!("Reconciled like counters on {} videos", repaired)),
        None,
    )))
}
