//! Account database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for accounts table
#[derive(Debug, Clone, FromRow)]
pub struct AccountModel {
    pub id: i64,
    pub role: String,
    pub display_name: String,
    pub coins: i64,
    pub points: i64,
    pub level: i32,
    pub is_live: bool,
    pub live_channel_name: Option<String>,
    pub live_started_at: Option<DateTime<Utc>>,
    pub hours_streamed: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
