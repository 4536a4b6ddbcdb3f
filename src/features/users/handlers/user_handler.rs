use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::policy::RequireModerate;
use crate::features::users::dtos::{AccountDto, UserProfileDto};
use crate::features::users::services::UserService;
use crate::shared::types::{ApiResponse, Meta};

/// Get the caller's own profile
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Profile retrieved", body = ApiResponse<UserProfileDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<UserProfileDto>>> {
    let profile = service.get_profile(user.id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// List all accounts with role and active flags (staff only)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Account list", body = ApiResponse<Vec<AccountDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff access required")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_accounts(
    RequireModerate(_user): RequireModerate,
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<Vec<AccountDto>>>> {
    let accounts = service.list_accounts().await?;
    let total = accounts.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(accounts),
        None,
        Some(Meta { total }),
    )))
}

/// Toggle the staff flag on an account (staff only)
#[utoipa::path(
    patch,
    path = "/api/users/{id}/toggle-admin",
    params(
        ("id" = Uuid, Path, description = "Target user id")
    ),
    responses(
        (status = 200, description = "Staff flag updated", body = ApiResponse<AccountDto>),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn toggle_admin_status(
    RequireModerate(_user): RequireModerate,
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccountDto>>> {
    let account = service.toggle_staff(id).await?;
    Ok(Json(ApiResponse::success(
        Some(account),
        Some("Admin status updated successfully".to_string()),
        None,
    )))
}

/// Toggle the active flag on an account (staff only)
#[utoipa::path(
    patch,
    path = "/api/users/{id}/toggle-active",
    params(
        ("id" = Uuid, Path, description = "Target user id")
    ),
    responses(
        (status = 200, description = "Active flag updated", body = ApiResponse<AccountDto>),
        (status = 403, description = "Staff access required"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn toggle_active_status(
    RequireModerate(_user): RequireModerate,
    State(service): State<Arc<UserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AccountDto>>> {
    let account = service.toggle_active(id).await?;
    Ok(Json(ApiResponse::success(
        Some(account),
        Some("Account status updated successfully".to_string()),
        None,
    )))
}
