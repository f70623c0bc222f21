//! Per-(spectator, streamer) progress

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::Snowflake;

/// Points a spectator has earned in one streamer's channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectatorProgress {
    pub spectator_id: Snowflake,
    pub streamer_id: Snowflake,
    pub points: i64,
    pub level: i32,
    pub updated_at: DateTime<Utc>,
}

impl SpectatorProgress {
    /// Starting row, created lazily on the first award
    pub fn new(spectator_id: Snowflake, streamer_id: Snowflake) -> Self {
        Self {
            spectator_id,
            streamer_id,
            points: 0,
            level: 1,
            updated_at: Utc::now(),
        }
    }
}
