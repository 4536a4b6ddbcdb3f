use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{Claims, TokenUse};

/// An access/refresh token pair issued at login or refresh
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Service for issuing and verifying HS256 JWTs
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
    leeway_secs: u64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_secs: config.access_token_ttl_secs as i64,
            refresh_ttl_secs: config.refresh_token_ttl_secs as i64,
            leeway_secs: config.jwt_leeway_secs,
        }
    }

    /// Issue an access/refresh token pair for the given user
    pub fn issue_pair(&self, user_id: Uuid, username: &str, is_staff: bool) -> Result<TokenPair> {
        let access_token = self.issue(
            user_id,
            username,
            is_staff,
            TokenUse::Access,
            self.access_ttl_secs,
        )?;
        let refresh_token = self.issue(
            user_id,
            username,
            is_staff,
            TokenUse::Refresh,
            self.refresh_ttl_secs,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_ttl_secs,
        })
    }

    fn issue(
        &self,
        user_id: Uuid,
        username: &str,
        is_staff: bool,
        token_use: TokenUse,
        ttl_secs: i64,
    ) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            is_staff,
            token_use,
            iat: now,
            exp: now + ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Decode and validate a token, checking signature, expiry and intended use
    pub fn verify(&self, token: &str, expected_use: TokenUse) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;

        if claims.token_use != expected_use {
            return Err(AppError::Auth(match expected_use {
                TokenUse::Access => "Refresh token cannot be used as a bearer credential".into(),
                TokenUse::Refresh => "Access token cannot be used for refresh".into(),
            }));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> TokenService {
        TokenService::new(&AuthConfig {
            jwt_secret: "test-secret-that-is-at-least-32-chars".to_string(),
            access_token_ttl_secs: 900,
            refresh_token_ttl_secs: 604800,
            jwt_leeway_secs: 0,
        })
    }

    #[test]
    fn test_issue_and_verify_pair() {
        let service = test_service();
        let user_id = Uuid::now_v7();

        let pair = service.issue_pair(user_id, "alice", true).unwrap();

        let access = service.verify(&pair.access_token, TokenUse::Access).unwrap();
        assert_eq!(access.sub, user_id);
        assert_eq!(access.username, "alice");
        assert!(access.is_staff);

        let refresh = service
            .verify(&pair.refresh_token, TokenUse::Refresh)
            .unwrap();
        assert_eq!(refresh.sub, user_id);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let service = test_service();
        let pair = service.issue_pair(Uuid::now_v7(), "bob", false).unwrap();

        let result = service.verify(&pair.refresh_token, TokenUse::Access);
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = test_service();
        let result = service.verify("not.a.jwt", TokenUse::Access);
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = test_service();
        let other = TokenService::new(&AuthConfig {
            jwt_secret: "another-secret-that-is-32-chars-long!".to_string(),
            access_token_ttl_secs: 900,
            refresh_token_ttl_secs: 604800,
            jwt_leeway_secs: 0,
        });

        let pair = service.issue_pair(Uuid::now_v7(), "carol", false).unwrap();
        assert!(other.verify(&pair.access_token, TokenUse::Access).is_err());
    }
}
