use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, model as auth_model};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::recommendations::{
    dtos as recommendations_dtos, handlers as recommendations_handlers,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::features::videos::{
    dtos as videos_dtos, handlers as videos_handlers, models as videos_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::refresh_token,
        auth_handlers::change_password,
        // Users
        users_handlers::get_profile,
        users_handlers::list_accounts,
        users_handlers::toggle_admin_status,
        users_handlers::toggle_active_status,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Videos
        videos_handlers::list_videos,
        videos_handlers::get_video,
        videos_handlers::submit_video,
        videos_handlers::update_video,
        videos_handlers::delete_video,
        videos_handlers::like_video,
        videos_handlers::unlike_video,
        videos_handlers::update_video_status,
        videos_handlers::liked_videos,
        videos_handlers::user_videos,
        videos_handlers::reconcile_likes,
        // Recommendations
        recommendations_handlers::recommend_videos,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_model::AuthenticatedUser,
            auth_dtos::RegisterRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::RefreshTokenRequestDto,
            auth_dtos::ChangePasswordRequestDto,
            auth_dtos::AuthUserDto,
            auth_dtos::AuthResponseDto,
            ApiResponse<auth_dtos::AuthResponseDto>,
            // Users
            users_dtos::UserProfileDto,
            users_dtos::AccountDto,
            ApiResponse<users_dtos::UserProfileDto>,
            ApiResponse<Vec<users_dtos::AccountDto>>,
            ApiResponse<users_dtos::AccountDto>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryRequestDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Videos
            videos_models::ModerationStatus,
            videos_dtos::SubmitVideoDto,
            videos_dtos::UpdateVideoDto,
            videos_dtos::UpdateVideoStatusDto,
            videos_dtos::VideoResponseDto,
            ApiResponse<Vec<videos_dtos::VideoResponseDto>>,
            ApiResponse<videos_dtos::VideoResponseDto>,
            // Recommendations
            recommendations_dtos::RecommendationsDto,
            ApiResponse<recommendations_dtos::RecommendationsDto>,
        )
    ),
    tags(
        (name = "auth", description = "Registration, login and credential management"),
        (name = "users", description = "Profiles and staff account management"),
        (name = "categories", description = "Video categories"),
        (name = "videos", description = "Video submission, listing, likes and moderation"),
        (name = "recommendations", description = "Category-based video recommendations"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Clipshare API",
        version = "0.1.0",
        description = "API documentation for Clipshare",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
