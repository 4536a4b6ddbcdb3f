use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::User;

/// Response DTO for the caller's own profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfileDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            is_staff: u.is_staff,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}

/// Response DTO for the staff account listing and account toggles
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountDto {
    pub id: Uuid,
    pub username: String,
    pub is_staff: bool,
    pub is_active: bool,
}

impl From<User> for AccountDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            is_staff: u.is_staff,
            is_active: u.is_active,
        }
    }
}
