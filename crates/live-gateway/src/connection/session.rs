//! Gateway session state machine
//!
//! `Connected → Joined(room) → Disconnected`. Disconnected is terminal; there is no
//! resume, a new socket is always a new session.

use live_core::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Socket open, no room yet
    #[default]
    Connected,
    /// Watching one streamer's room
    Joined {
        room: Snowflake,
        account_id: Option<Snowflake>,
        display_name: String,
    },
    Disconnected,
}

impl SessionState {
    pub fn room(&self) -> Option<Snowflake> {
        match self {
            Self::Joined { room, .. } => Some(*room),
            _ => None,
        }
    }

    pub fn is_disconnected(&self) -> bool {
        matches!(self, Self::Disconnected)
    }

    /// Move into `room`; a disconnected session stays disconnected
    pub fn join(&mut self, room: Snowflake, account_id: Option<Snowflake>, display_name: String) -> bool {
        if self.is_disconnected() {
            return false;
        }
        *self = Self::Joined {
            room,
            account_id,
            display_name,
        };
        true
    }

    pub fn disconnect(&mut self) {
        *self = Self::Disconnected;
    }
}
