use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Create routes for the users feature
///
/// All routes require the auth middleware; staff-only routes are guarded by
/// the `Moderate` capability at the handler level.
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/user", get(handlers::get_profile))
        .route("/api/users", get(handlers::list_accounts))
        .route(
            "/api/users/{id}/toggle-admin",
            patch(handlers::toggle_admin_status),
        )
        .route(
            "/api/users/{id}/toggle-active",
            patch(handlers::toggle_active_status),
        )
        .with_state(service)
}
