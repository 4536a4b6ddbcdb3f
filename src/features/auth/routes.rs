use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;

/// Routes that must be reachable without a bearer token
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/register", post(handlers::register))
        .route("/api/token", post(handlers::login))
        .route("/api/token/refresh", post(handlers::refresh_token))
        .with_state(service)
}

/// Routes that require the auth middleware to be applied by the caller
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/change-password", post(handlers::change_password))
        .with_state(service)
}
