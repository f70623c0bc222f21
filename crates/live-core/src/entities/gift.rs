//! Gift entity - a catalog entry a spectator can send to a streamer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Gift definition. Immutable once created; only deletion is supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: Snowflake,
    pub streamer_id: Snowflake,
    pub name: String,
    pub emoji: String,
    /// Coins charged per unit
    pub cost: i64,
    /// Points credited to the receiver per unit
    pub points: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Gift {
    pub fn new(
        id: Snowflake,
        streamer_id: Snowflake,
        name: String,
        emoji: String,
        cost: i64,
        points: i64,
    ) -> Self {
        Self {
            id,
            streamer_id,
            name,
            emoji,
            cost,
            points,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Coins for `amount` units, `None` on overflow
    #[inline]
    pub fn total_cost(&self, amount: i64) -> Option<i64> {
        self.cost.checked_mul(amount)
    }

    /// Points for `amount` units, `None` on overflow
    #[inline]
    pub fn total_points(&self, amount: i64) -> Option<i64> {
        self.points.checked_mul(amount)
    }

    #[inline]
    pub fn is_owned_by(&self, streamer_id: Snowflake) -> bool {
        self.streamer_id == streamer_id
    }
}
