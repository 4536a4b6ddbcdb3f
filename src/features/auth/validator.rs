use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, TokenUse};
use crate::features::auth::services::TokenService;

/// Validates bearer tokens for the auth middleware.
///
/// Signature and expiry come from the token itself; `is_staff` and
/// `is_active` are re-read from the users table so that moderation toggles
/// take effect without waiting for the token to expire.
pub struct JwtValidator {
    token_service: Arc<TokenService>,
    pool: PgPool,
}

impl JwtValidator {
    pub fn new(token_service: Arc<TokenService>, pool: PgPool) -> Self {
        Self {
            token_service,
            pool,
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let claims = self.token_service.verify(token, TokenUse::Access)?;

        let row = sqlx::query_as::<_, (String, bool, bool)>(
            r#"
            SELECT username, is_staff, is_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(claims.sub)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load user for token validation: {:?}", e);
            AppError::Database(e)
        })?;

        let (username, is_staff, is_active) = row
            .ok_or_else(|| AppError::Auth("Token refers to a user that no longer exists".into()))?;

        if !is_active {
            return Err(AppError::Auth("Account is disabled".into()));
        }

        Ok(AuthenticatedUser {
            id: claims.sub,
            username,
            is_staff,
        })
    }
}
