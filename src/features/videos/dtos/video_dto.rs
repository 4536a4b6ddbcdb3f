use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::videos::models::{ModerationStatus, VideoWithAuthor};

/// Request DTO for submitting a video
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitVideoDto {
    /// YouTube link, must not have been submitted before
    #[validate(length(min = 1, max = 2048, message = "Link must be 1-2048 characters"))]
    pub link: String,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: String,

    /// Category ids, between 1 and 2 of them
    pub categories: Vec<Uuid>,
}

/// Request DTO for editing a submission; omitted fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateVideoDto {
    #[validate(length(min = 1, max = 2048, message = "Link must be 1-2048 characters"))]
    pub link: Option<String>,

    #[validate(length(max = 5000, message = "Description must not exceed 5000 characters"))]
    pub description: Option<String>,

    pub categories: Option<Vec<Uuid>>,
}

/// Request DTO for the staff moderation decision
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateVideoStatusDto {
    pub status: ModerationStatus,
}

/// Query params for listing videos
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct VideoListQuery {
    /// Narrow to videos tagged with this category
    pub category_1: Option<Uuid>,

    /// Narrow further; with both set, only videos tagged with both match
    pub category_2: Option<Uuid>,

    /// Moderation status filter, honored for staff callers only
    pub status: Option<ModerationStatus>,
}

/// Response DTO for a video
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VideoResponseDto {
    pub id: Uuid,
    pub link: String,
    pub description: String,
    pub categories: Vec<CategoryResponseDto>,
    pub submitted_by: String,
    pub status: ModerationStatus,
    pub like_count: i32,
    pub created_at: DateTime<Utc>,
}

impl VideoResponseDto {
    pub fn from_row(row: VideoWithAuthor, categories: Vec<CategoryResponseDto>) -> Self {
        Self {
            id: row.id,
            link: row.link,
            description: row.description,
            categories,
            submitted_by: row.submitted_by,
            status: row.status,
            like_count: row.like_count,
            created_at: row.created_at,
        }
    }
}
