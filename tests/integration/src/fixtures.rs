//! Test fixtures
//!
//! Request bodies and the response shapes the tests read back.

use live_core::Snowflake;
use serde::Deserialize;
use serde_json::{json, Value};

pub const STREAMER_ID: Snowflake = Snowflake::new(1001);
pub const SPECTATOR_ID: Snowflake = Snowflake::new(2001);
pub const OTHER_SPECTATOR_ID: Snowflake = Snowflake::new(2002);

/// The catalog entry most scenarios use: 10 coins, 5 points
pub fn rose() -> Value {
    json!({ "name": "Rose", "emoji": "🌹", "cost": 10, "points": 5 })
}

pub fn purchase(coin_amount: i64) -> Value {
    json!({ "coinAmount": coin_amount, "price": 0.99 })
}

pub fn send_gift(receiver_id: Snowflake, gift_id: Snowflake, amount: i64) -> Value {
    json!({ "receiverId": receiver_id, "giftId": gift_id, "amount": amount })
}

pub fn level_tier(level_number: i32, level_name: &str, required_points: i64) -> Value {
    json!({ "levelNumber": level_number, "levelName": level_name, "requiredPoints": required_points })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftBody {
    pub id: Snowflake,
    pub streamer_id: Snowflake,
    pub name: String,
    pub cost: i64,
    pub points: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBody {
    pub sender_coins: i64,
    pub receiver_points: i64,
    pub receiver_level: i32,
}

#[derive(Debug, Deserialize)]
pub struct BalanceBody {
    pub id: Snowflake,
    pub coins: i64,
    pub points: i64,
    pub level: i32,
}

#[derive(Debug, Deserialize)]
pub struct ProgressBody {
    pub points: i64,
    pub level: i32,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<Value>,
}
