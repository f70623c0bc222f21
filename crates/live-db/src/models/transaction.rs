//! Transaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Received-gift row (transactions joined with sender and gift)
#[derive(Debug, Clone, FromRow)]
pub struct GiftReceiptModel {
    pub id: i64,
    pub sender_id: i64,
    pub sender_name: String,
    pub gift_id: Option<i64>,
    pub gift_name: Option<String>,
    pub gift_emoji: Option<String>,
    pub gift_points: Option<i64>,
    pub amount: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
