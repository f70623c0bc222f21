//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Field names are camelCase on the wire.

use live_core::Snowflake;
use serde::Deserialize;
use validator::Validate;

fn default_amount() -> i64 {
    1
}

// ============================================================================
// Gift Requests
// ============================================================================

/// Gift transfer; the sender is the authenticated caller
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendGiftRequest {
    pub receiver_id: Snowflake,

    pub gift_id: Snowflake,

    #[serde(default = "default_amount")]
    #[validate(range(min = 1, message = "Amount must be at least 1"))]
    pub amount: i64,
}

/// New catalog entry owned by the calling streamer
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGiftRequest {
    #[validate(length(min = 1, max = 64, message = "Gift name must be 1-64 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 16, message = "Emoji must be 1-16 characters"))]
    pub emoji: String,

    #[validate(range(min = 1, message = "Cost must be positive"))]
    pub cost: i64,

    #[validate(range(min = 1, message = "Points must be positive"))]
    pub points: i64,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

// ============================================================================
// Coin Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseCoinsRequest {
    #[validate(range(min = 1, message = "Coin amount must be positive"))]
    pub coin_amount: i64,

    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: f64,
}

// ============================================================================
// Progress Requests
// ============================================================================

/// Award progress points to the caller in one streamer's channel
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddSpectatorPointsRequest {
    #[validate(range(min = 0, message = "Points to add cannot be negative"))]
    pub points_to_add: i64,

    pub streamer_id: Snowflake,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddStreamerPointsRequest {
    #[validate(range(min = 0, message = "Points to add cannot be negative"))]
    pub points_to_add: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddStreamHoursRequest {
    #[validate(range(min = 0.0, message = "Hours to add cannot be negative"))]
    pub hours_to_add: f64,
}

// ============================================================================
// Streaming Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StartStreamRequest {
    #[validate(length(min = 1, max = 100, message = "Channel name must be 1-100 characters"))]
    pub channel_name: String,
}

// ============================================================================
// Level Tier Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLevelRequest {
    #[validate(range(min = 1, message = "Level number must be at least 1"))]
    pub level_number: i32,

    #[validate(length(min = 1, max = 64, message = "Level name must be 1-64 characters"))]
    pub level_name: String,

    #[validate(range(min = 0, message = "Required points cannot be negative"))]
    pub required_points: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLevelRequest {
    #[validate(length(min = 1, max = 64, message = "Level name must be 1-64 characters"))]
    pub level_name: String,

    #[validate(range(min = 0, message = "Required points cannot be negative"))]
    pub required_points: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_gift_amount_defaults_to_one() {
        let req: SendGiftRequest =
            serde_json::from_str(r#"{"receiverId":"2","giftId":"10"}"#).unwrap();
        assert_eq!(req.amount, 1);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_send_gift_rejects_zero_amount() {
        let req: SendGiftRequest =
            serde_json::from_str(r#"{"receiverId":"2","giftId":"10","amount":0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_gift_requires_positive_values() {
        let req: CreateGiftRequest =
            serde_json::from_str(r#"{"name":"Rose","emoji":"🌹","cost":0,"points":5}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreateGiftRequest =
            serde_json::from_str(r#"{"name":"Rose","emoji":"🌹","cost":10,"points":5}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_missing_field_fails_to_parse() {
        let parsed = serde_json::from_str::<CreateGiftRequest>(r#"{"name":"Rose","cost":1}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_purchase_price_must_be_positive() {
        let req: PurchaseCoinsRequest =
            serde_json::from_str(r#"{"coinAmount":100,"price":0}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
