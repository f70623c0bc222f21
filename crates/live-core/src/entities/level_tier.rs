//! Level tier - one row of a streamer's custom level table

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelTier {
    pub id: Snowflake,
    pub streamer_id: Snowflake,
    pub level_number: i32,
    pub level_name: String,
    pub required_points: i64,
    pub created_at: DateTime<Utc>,
}

impl LevelTier {
    pub fn new(
        id: Snowflake,
        streamer_id: Snowflake,
        level_number: i32,
        level_name: String,
        required_points: i64,
    ) -> Self {
        Self {
            id,
            streamer_id,
            level_number,
            level_name,
            required_points,
            created_at: Utc::now(),
        }
    }
}
