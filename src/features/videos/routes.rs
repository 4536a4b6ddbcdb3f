use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::features::videos::handlers::{self, VideoState};
use crate::features::videos::services::{LikeService, VideoService};

/// Create routes for the videos feature.
///
/// The caller applies the optional-auth middleware: reads work anonymously
/// (pinned to approved videos), while every mutating handler demands an
/// authenticated caller through its extractor, and moderation handlers
/// demand staff.
pub fn routes(video_service: Arc<VideoService>, like_service: Arc<LikeService>) -> Router {
    let state = VideoState {
        video_service,
        like_service,
    };

    Router::new()
        .route(
            "/api/videos",
            get(handlers::list_videos).post(handlers::submit_video),
        )
        .route(
            "/api/videos/{id}",
            get(handlers::get_video)
                .patch(handlers::update_video)
                .put(handlers::update_video)
                .delete(handlers::delete_video),
        )
        .route("/api/videos/{id}/like", post(handlers::like_video))
        .route("/api/videos/{id}/unlike", delete(handlers::unlike_video))
        .route(
            "/api/videos/{id}/status",
            patch(handlers::update_video_status),
        )
        .route("/api/liked-videos", get(handlers::liked_videos))
        .route("/api/user-videos", get(handlers::user_videos))
        .route(
            "/api/admin/reconcile-likes",
            post(handlers::reconcile_likes),
        )
        .with_state(state)
}
