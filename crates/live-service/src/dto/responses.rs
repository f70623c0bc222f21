//! Response DTOs for API endpoints
//!
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

use live_core::entities::{Account, AccountRole, SpectatorProgress};
use live_core::Snowflake;

// ============================================================================
// Economy
// ============================================================================

/// Balances after a gift transfer, re-read from the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftTransferResponse {
    pub sender_coins: i64,
    pub receiver_points: i64,
    pub receiver_level: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub new_balance: i64,
    pub coins_purchased: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    pub id: Snowflake,
    pub coins: i64,
    pub points: i64,
    pub level: i32,
}

impl From<&Account> for BalanceResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            coins: account.coins,
            points: account.points,
            level: account.level,
        }
    }
}

// ============================================================================
// Accounts and progress
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Snowflake,
    pub role: AccountRole,
    pub display_name: String,
    pub coins: i64,
    pub points: i64,
    pub level: i32,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            role: account.role,
            display_name: account.display_name,
            coins: account.coins,
            points: account.points,
            level: account.level,
        }
    }
}

/// Points and level pair, used for both progress rows and streamer totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressResponse {
    pub points: i64,
    pub level: i32,
}

impl ProgressResponse {
    /// What a spectator sees before earning anything in a channel
    pub const fn initial() -> Self {
        Self { points: 0, level: 1 }
    }
}

impl From<SpectatorProgress> for ProgressResponse {
    fn from(progress: SpectatorProgress) -> Self {
        Self {
            points: progress.points,
            level: progress.level,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamHoursResponse {
    pub hours_streamed: f64,
    pub level: i32,
    pub points: i64,
}

// ============================================================================
// Streaming
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStartedResponse {
    pub channel_name: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStoppedResponse {
    /// Length of the session that just ended
    pub hours_streamed: f64,
    pub total_hours: f64,
    pub level: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStreamerResponse {
    pub id: Snowflake,
    pub display_name: String,
    pub channel_name: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub level: i32,
    pub points: i64,
}

impl From<Account> for LiveStreamerResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            display_name: account.display_name,
            channel_name: account.live.channel_name,
            started_at: account.live.started_at,
            level: account.level,
            points: account.points,
        }
    }
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub ledger: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_response_is_camel_case() {
        let json = serde_json::to_value(GiftTransferResponse {
            sender_coins: 2,
            receiver_points: 5,
            receiver_level: 1,
        })
        .unwrap();
        assert_eq!(json["senderCoins"], 2);
        assert_eq!(json["receiverPoints"], 5);
        assert_eq!(json["receiverLevel"], 1);
    }

    #[test]
    fn test_balance_id_is_string() {
        let account = Account::new(Snowflake::new(42), AccountRole::Spectator, "v".into());
        let json = serde_json::to_value(BalanceResponse::from(&account)).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["level"], 1);
    }
}
