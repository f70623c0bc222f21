//! Account entity - a spectator or streamer balance sheet

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::Snowflake;

/// Which side of the stream an account sits on
///
/// The role decides which balances are meaningful: spectators spend coins, streamers
/// collect points and go live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Spectator,
    Streamer,
}

impl AccountRole {
    /// Points per level for the default (tier-less) formula
    #[inline]
    pub const fn points_per_level(self) -> i64 {
        match self {
            Self::Spectator => 50,
            Self::Streamer => 100,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spectator => "spectator",
            Self::Streamer => "streamer",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spectator" => Ok(Self::Spectator),
            "streamer" => Ok(Self::Streamer),
            other => Err(format!("unknown account role: {other}")),
        }
    }
}

/// Live broadcast state of a streamer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LiveStatus {
    pub is_live: bool,
    pub channel_name: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub hours_streamed: f64,
}

impl LiveStatus {
    /// Hours elapsed since the broadcast started, zero when offline
    pub fn elapsed_hours(&self, now: DateTime<Utc>) -> f64 {
        match (self.is_live, self.started_at) {
            (true, Some(started)) => {
                let millis = (now - started).num_milliseconds().max(0);
                millis as f64 / 3_600_000.0
            }
            _ => 0.0,
        }
    }
}

/// Account balances as held by the ledger store
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Snowflake,
    pub role: AccountRole,
    pub display_name: String,
    pub coins: i64,
    pub points: i64,
    pub level: i32,
    pub live: LiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Fresh account with zero balances at level 1
    pub fn new(id: Snowflake, role: AccountRole, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            role,
            display_name,
            coins: 0,
            points: 0,
            level: 1,
            live: LiveStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_streamer(&self) -> bool {
        self.role == AccountRole::Streamer
    }

    #[inline]
    pub fn can_afford(&self, cost: i64) -> bool {
        self.coins >= cost
    }
}

/// Defaults used when an account is created lazily on first access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub id: Snowflake,
    pub role: AccountRole,
    pub display_name: String,
}

impl NewAccount {
    pub fn new(id: Snowflake, role: AccountRole, display_name: impl Into<String>) -> Self {
        Self {
            id,
            role,
            display_name: display_name.into(),
        }
    }

    pub fn into_account(self) -> Account {
        Account::new(self.id, self.role, self.display_name)
    }
}
