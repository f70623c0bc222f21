//! Level tier database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for level_tiers table
#[derive(Debug, Clone, FromRow)]
pub struct LevelTierModel {
    pub id: i64,
    pub streamer_id: i64,
    pub level_number: i32,
    pub level_name: String,
    pub required_points: i64,
    pub created_at: DateTime<Utc>,
}
