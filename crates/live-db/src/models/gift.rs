//! Gift database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for gifts table
#[derive(Debug, Clone, FromRow)]
pub struct GiftModel {
    pub id: i64,
    pub streamer_id: i64,
    pub name: String,
    pub emoji: String,
    pub cost: i64,
    pub points: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
