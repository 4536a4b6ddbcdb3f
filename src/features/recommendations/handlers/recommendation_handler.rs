use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::recommendations::dtos::RecommendationsDto;
use crate::features::recommendations::services::RecommendationService;
use crate::shared::types::ApiResponse;

/// Recommend videos from the caller's favorite category
///
/// The favorite category is voted by the categories of the 7 most recently
/// liked videos; already-liked videos are never recommended.
#[utoipa::path(
    get,
    path = "/api/recommend-videos",
    responses(
        (status = 200, description = "Recommendations", body = ApiResponse<RecommendationsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Caller has no likes to derive a favorite category from")
    ),
    tag = "recommendations",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn recommend_videos(
    user: AuthenticatedUser,
    State(service): State<Arc<RecommendationService>>,
) -> Result<Json<ApiResponse<RecommendationsDto>>> {
    let recommendations = service.recommend(user.id).await?;
    Ok(Json(ApiResponse::success(
        Some(recommendations),
        None,
        None,
    )))
}
