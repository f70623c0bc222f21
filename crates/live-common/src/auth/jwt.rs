//! JWT validation for platform access tokens
//!
//! Tokens are issued by the identity service; this side only needs to check them and
//! read who the caller is. `issue_access_token` exists for tooling and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use live_core::{AccountRole, Snowflake};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Spectator or streamer
    pub role: AccountRole,
    /// Display name shown in chat and viewer lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// # Errors
    /// Returns an error if the subject cannot be parsed as a Snowflake
    pub fn account_id(&self) -> Result<Snowflake, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(
        &self,
        account_id: Snowflake,
        role: AccountRole,
        name: Option<String>,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            role,
            name,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate an access token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 900)
    }

    #[test]
    fn test_issue_and_validate() {
        let service = service();
        let token = service
            .issue_access_token(Snowflake::new(12345), AccountRole::Streamer, Some("ana".into()))
            .unwrap();

        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.account_id().unwrap(), Snowflake::new(12345));
        assert_eq!(claims.role, AccountRole::Streamer);
        assert_eq!(claims.name.as_deref(), Some("ana"));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = service()
            .issue_access_token(Snowflake::new(1), AccountRole::Spectator, None)
            .unwrap();
        let other = JwtService::new("another-secret-key-that-is-long", 900);
        assert!(matches!(
            other.validate_access_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new("test-secret-key-that-is-long-enough", -3600);
        let token = service
            .issue_access_token(Snowflake::new(1), AccountRole::Spectator, None)
            .unwrap();
        assert!(matches!(
            service.validate_access_token(&token),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            role: AccountRole::Spectator,
            name: None,
            iat: 0,
            exp: i64::MAX,
        };
        assert!(claims.account_id().is_err());
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            service().validate_access_token("invalid.token.here"),
            Err(AppError::InvalidToken)
        ));
    }
}
