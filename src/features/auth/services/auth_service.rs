use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, ChangePasswordRequestDto, LoginRequestDto, RefreshTokenRequestDto,
    RegisterRequestDto,
};
use crate::features::auth::model::{AuthenticatedUser, TokenUse};
use crate::features::auth::password;
use crate::features::auth::services::TokenService;
use crate::features::users::models::User;
use crate::shared::validation::USERNAME_REGEX;

/// Service for account registration and credential flows
pub struct AuthService {
    pool: PgPool,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, token_service: Arc<TokenService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }

    /// Register a new account and log it in
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        if !USERNAME_REGEX.is_match(&dto.username) {
            return Err(AppError::Validation(
                "Username may only contain letters, digits and underscores, and must not start with a digit".to_string(),
            ));
        }

        let taken = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)"#,
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check username availability: {:?}", e);
            AppError::Database(e)
        })?;

        if taken {
            return Err(AppError::Validation(
                "Username or email is already registered".to_string(),
            ));
        }

        let password_hash = password::hash_password(&dto.password)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, is_staff, is_active, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert user: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Registered new user: {}", user.username);

        self.issue_response(user)
    }

    /// Verify credentials and issue a token pair
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_staff, is_active, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(&dto.username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load user for login: {:?}", e);
            AppError::Database(e)
        })?;

        let user = user.ok_or_else(|| AppError::Auth("Invalid username or password".into()))?;

        if !password::verify_password(&dto.password, &user.password_hash) {
            return Err(AppError::Auth("Invalid username or password".into()));
        }

        if !user.is_active {
            return Err(AppError::Forbidden("Account is disabled".into()));
        }

        self.issue_response(user)
    }

    /// Exchange a valid refresh token for a new token pair
    pub async fn refresh_token(&self, dto: RefreshTokenRequestDto) -> Result<AuthResponseDto> {
        let claims = self
            .token_service
            .verify(&dto.refresh_token, TokenUse::Refresh)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, is_staff, is_active, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(claims.sub)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load user for refresh: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::Auth("Token refers to a user that no longer exists".into()))?;

        if !user.is_active {
            return Err(AppError::Forbidden("Account is disabled".into()));
        }

        self.issue_response(user)
    }

    /// Change the caller's password, requiring the current one
    pub async fn change_password(
        &self,
        caller: &AuthenticatedUser,
        dto: ChangePasswordRequestDto,
    ) -> Result<()> {
        let current_hash = sqlx::query_scalar::<_, String>(
            r#"SELECT password_hash FROM users WHERE id = $1"#,
        )
        .bind(caller.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load password hash: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        if !password::verify_password(&dto.current_password, &current_hash) {
            return Err(AppError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        let new_hash = password::hash_password(&dto.new_password)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        sqlx::query(r#"UPDATE users SET password_hash = $1 WHERE id = $2"#)
            .bind(&new_hash)
            .bind(caller.id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update password: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Password changed for user: {}", caller.username);

        Ok(())
    }

    fn issue_response(&self, user: User) -> Result<AuthResponseDto> {
        let pair = self
            .token_service
            .issue_pair(user.id, &user.username, user.is_staff)?;

        Ok(AuthResponseDto {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: pair.expires_in,
            user: user.into(),
        })
    }
}
