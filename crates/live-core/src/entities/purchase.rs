//! Purchase entity - a coin top-up

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Pending,
    #[default]
    Completed,
    Failed,
}

impl PurchaseStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for PurchaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown purchase status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub id: Snowflake,
    pub account_id: Snowflake,
    pub coin_amount: i64,
    pub price: f64,
    pub status: PurchaseStatus,
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    /// Payment capture is external; purchases are recorded as already completed
    pub fn completed(id: Snowflake, account_id: Snowflake, coin_amount: i64, price: f64) -> Self {
        Self {
            id,
            account_id,
            coin_amount,
            price,
            status: PurchaseStatus::Completed,
            created_at: Utc::now(),
        }
    }
}
