//! Capability-based authorization policy.
//!
//! Every endpoint expresses its requirement as one capability instead of an
//! ad-hoc role check:
//! - `Read`: anyone, including anonymous callers
//! - `Write`: any authenticated user (submitting videos, liking, profile ops)
//! - `Moderate`: staff only (video approval, account toggles, repair ops)

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Read,
    Write,
    Moderate,
}

/// The single authorization decision point
pub fn allows(caller: Option<&AuthenticatedUser>, capability: Capability) -> bool {
    match capability {
        Capability::Read => true,
        Capability::Write => caller.is_some(),
        Capability::Moderate => caller.map(|u| u.is_staff).unwrap_or(false),
    }
}

/// Guard extractor for endpoints that require the `Moderate` capability.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireModerate(user): RequireModerate) { ... }
/// ```
pub struct RequireModerate(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireModerate
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !allows(Some(user), Capability::Moderate) {
            return Err(AppError::Forbidden("Staff access required".to_string()));
        }

        Ok(RequireModerate(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_regular_user, create_staff_user, with_auth};
    use axum::http::StatusCode;
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    #[test]
    fn test_read_allowed_for_everyone() {
        assert!(allows(None, Capability::Read));
        assert!(allows(Some(&create_regular_user()), Capability::Read));
    }

    #[test]
    fn test_write_requires_authentication() {
        assert!(!allows(None, Capability::Write));
        assert!(allows(Some(&create_regular_user()), Capability::Write));
        assert!(allows(Some(&create_staff_user()), Capability::Write));
    }

    #[test]
    fn test_moderate_requires_staff() {
        assert!(!allows(None, Capability::Moderate));
        assert!(!allows(Some(&create_regular_user()), Capability::Moderate));
        assert!(allows(Some(&create_staff_user()), Capability::Moderate));
    }

    async fn moderate_only(RequireModerate(user): RequireModerate) -> String {
        user.username
    }

    fn test_router() -> Router {
        Router::new().route("/moderate", get(moderate_only))
    }

    #[tokio::test]
    async fn test_guard_passes_staff() {
        let server = TestServer::new(with_auth(test_router(), create_staff_user())).unwrap();
        let response = server.get("/moderate").await;
        response.assert_status_ok();
        response.assert_text("test_staff");
    }

    #[tokio::test]
    async fn test_guard_rejects_non_staff() {
        let server = TestServer::new(with_auth(test_router(), create_regular_user())).unwrap();
        let response = server.get("/moderate").await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_guard_rejects_anonymous() {
        let server = TestServer::new(test_router()).unwrap();
        let response = server.get("/moderate").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
