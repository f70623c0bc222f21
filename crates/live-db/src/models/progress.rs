//! Spectator progress database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for spectator_progress table
#[derive(Debug, Clone, FromRow)]
pub struct ProgressModel {
    pub spectator_id: i64,
    pub streamer_id: i64,
    pub points: i64,
    pub level: i32,
    pub updated_at: DateTime<Utc>,
}
