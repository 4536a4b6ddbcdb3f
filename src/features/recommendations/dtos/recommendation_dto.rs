use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::videos::dtos::VideoResponseDto;

/// Response DTO for recommended videos
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecommendationsDto {
    /// The category the recommendations were drawn from
    pub favorite_category: String,
    pub videos: Vec<VideoResponseDto>,
}
