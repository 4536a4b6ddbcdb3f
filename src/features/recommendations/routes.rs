use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::recommendations::handlers;
use crate::features::recommendations::services::RecommendationService;

/// Create routes for the recommendations feature (auth required)
pub fn routes(service: Arc<RecommendationService>) -> Router {
    Router::new()
        .route("/api/recommend-videos", get(handlers::recommend_videos))
        .with_state(service)
}
