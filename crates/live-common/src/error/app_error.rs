//! Application error types
//!
//! Unified error handling shared by the HTTP API and the realtime gateway.

use live_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::InvalidToken | Self::TokenExpired => 401,
            Self::NotFound(_) => 404,
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,
            Self::Domain(e) => domain_status(e),
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }
}

/// HTTP status for a domain error
#[must_use]
pub fn domain_status(err: &DomainError) -> u16 {
    if err.is_not_found() {
        404
    } else if err.is_authorization() {
        403
    } else if err.is_validation() {
        400
    } else if err.is_conflict() {
        409
    } else {
        500
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use live_core::Snowflake;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Validation("amount".to_string()).status_code(), 400);
        assert_eq!(AppError::TokenExpired.status_code(), 401);
        assert_eq!(AppError::NotFound("gift".to_string()).status_code(), 404);
        assert_eq!(AppError::Database("down".to_string()).status_code(), 500);
        assert_eq!(AppError::Config("x".to_string()).status_code(), 500);
    }

    #[test]
    fn test_domain_status_codes() {
        let not_found = AppError::from(DomainError::GiftNotFound(Snowflake::new(1)));
        assert_eq!(not_found.status_code(), 404);
        assert_eq!(not_found.error_code(), "UNKNOWN_GIFT");

        let conflict = AppError::from(DomainError::ConcurrencyConflict);
        assert_eq!(conflict.status_code(), 409);

        let owner = AppError::from(DomainError::NotAccountOwner);
        assert_eq!(owner.status_code(), 403);

        let funds = AppError::from(DomainError::InsufficientFunds {
            required: 10,
            available: 2,
        });
        assert_eq!(funds.status_code(), 400);
        assert_eq!(funds.error_code(), "INSUFFICIENT_FUNDS");
    }

    #[test]
    fn test_every_variant_has_a_code() {
        let errors = [
            AppError::InvalidToken,
            AppError::TokenExpired,
            AppError::Validation("amount".to_string()),
            AppError::NotFound("gift".to_string()),
            AppError::Database("down".to_string()),
            AppError::Internal(anyhow::anyhow!("boom")),
            AppError::Config("x".to_string()),
        ];
        let codes: Vec<&str> = errors.iter().map(AppError::error_code).collect();
        assert_eq!(
            codes,
            [
                "INVALID_TOKEN",
                "TOKEN_EXPIRED",
                "VALIDATION_ERROR",
                "NOT_FOUND",
                "DATABASE_ERROR",
                "INTERNAL_ERROR",
                "CONFIG_ERROR",
            ]
        );
    }
}
