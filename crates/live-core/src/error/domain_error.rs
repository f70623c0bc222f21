//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::AccountRole;
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Account not found: {0}")]
    AccountNotFound(Snowflake),

    #[error("Gift not found: {0}")]
    GiftNotFound(Snowflake),

    #[error("Level tier not found: {0}")]
    LevelTierNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    #[error("Account {id} is not a {expected}")]
    WrongRole { id: Snowflake, expected: AccountRole },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the owner of this account")]
    NotAccountOwner,

    // =========================================================================
    // Ledger Errors
    // =========================================================================
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("Balance changed concurrently, retry the operation")]
    ConcurrencyConflict,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Gift name already in use: {0}")]
    GiftNameExists(String),

    #[error("Level {0} already exists")]
    LevelTierExists(i32),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::AccountNotFound(_) => "UNKNOWN_ACCOUNT",
            Self::GiftNotFound(_) => "UNKNOWN_GIFT",
            Self::LevelTierNotFound(_) => "UNKNOWN_LEVEL",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::WrongRole { .. } => "WRONG_ACCOUNT_ROLE",

            // Authorization
            Self::NotAccountOwner => "NOT_ACCOUNT_OWNER",

            // Ledger
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::ConcurrencyConflict => "CONCURRENCY_CONFLICT",

            // Conflict
            Self::GiftNameExists(_) => "GIFT_NAME_EXISTS",
            Self::LevelTierExists(_) => "LEVEL_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AccountNotFound(_) | Self::GiftNotFound(_) | Self::LevelTierNotFound(_)
        )
    }

    /// Check if this is a validation error
    ///
    /// Insufficient funds counts as one: the request cannot succeed as sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidAmount(_)
                | Self::WrongRole { .. }
                | Self::InsufficientFunds { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAccountOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ConcurrencyConflict | Self::GiftNameExists(_) | Self::LevelTierExists(_)
        )
    }

    /// Whether the caller may retry the same request unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict)
    }
}
