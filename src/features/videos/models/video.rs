use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Moderation state of a submission.
///
/// A single tri-state value: a video is pending until staff approve or deny
/// it, and can never be approved and denied at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "moderation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Denied,
}

/// Database model for a video submission
#[derive(Debug, Clone, FromRow)]
pub struct Video {
    pub id: Uuid,
    pub link: String,
    pub description: String,
    pub user_id: Uuid,
    pub status: ModerationStatus,
    pub like_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Video row joined with its submitter's username
#[derive(Debug, Clone, FromRow)]
pub struct VideoWithAuthor {
    pub id: Uuid,
    pub link: String,
    pub description: String,
    pub user_id: Uuid,
    pub status: ModerationStatus,
    pub like_count: i32,
    pub created_at: DateTime<Utc>,
    pub submitted_by: String,
}
