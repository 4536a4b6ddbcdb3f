use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{AccountDto, UserProfileDto};
use crate::features::users::models::User;

/// Service for profile lookup and staff-only account management
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the caller's own profile
    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserProfileDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_staff, is_active, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load profile: {:?}", e);
            AppError::Database(e)
        })?;

        user.map(|u| u.into())
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// List all accounts with role and active flags
    pub async fn list_accounts(&self) -> Result<Vec<AccountDto>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_staff, is_active, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list accounts: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    /// Flip the staff flag on the target account
    pub async fn toggle_staff(&self, target_id: Uuid) -> Result<AccountDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_staff = NOT is_staff
            WHERE id = $1
            RETURNING id, username, email, password_hash, is_staff, is_active, created_at
            "#,
        )
        .bind(target_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to toggle staff flag: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!(
            "Staff flag for {} is now {}",
            user.username,
            user.is_staff
        );

        Ok(user.into())
    }

    /// Flip the active flag on the target account
    pub async fn toggle_active(&self, target_id: Uuid) -> Result<AccountDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_active = NOT is_active
            WHERE id = $1
            RETURNING id, username, email, password_hash, is_staff, is_active, created_at
            "#,
        )
        .bind(target_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to toggle active flag: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!(
            "Active flag for {} is now {}",
            user.username,
            user.is_active
        );

        Ok(user.into())
    }
}
