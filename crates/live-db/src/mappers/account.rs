//! Account model -> entity mapper

use live_core::entities::{Account, AccountRole, LiveStatus};
use live_core::value_objects::Snowflake;

use crate::models::AccountModel;

/// Convert the database role column; the CHECK constraint keeps it to two values
pub fn parse_role(role: &str) -> AccountRole {
    match role {
        "streamer" => AccountRole::Streamer,
        _ => AccountRole::Spectator,
    }
}

impl From<AccountModel> for Account {
    fn from(model: AccountModel) -> Self {
        Account {
            id: Snowflake::new(model.id),
            role: parse_role(&model.role),
            display_name: model.display_name,
            coins: model.coins,
            points: model.points,
            level: model.level,
            live: LiveStatus {
                is_live: model.is_live,
                channel_name: model.live_channel_name,
                started_at: model.live_started_at,
                hours_streamed: model.hours_streamed,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
