//! Room events - state changes the application layer hands to the realtime gateway
//!
//! The gateway decides the audience from [`RoomEvent::room`]: a streamer's room, or
//! every connected client when no room is named.

use serde::Serialize;
use serde_json::Value;

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomEvent {
    /// A gift landed on a streamer; payload is forwarded to the room verbatim
    GiftReceived { streamer_id: Snowflake, payload: Value },

    /// A streamer's catalog gained an entry
    GiftListUpdated { streamer_id: Snowflake, gift: Value },

    /// Live/offline transition, announced to every client
    StreamerStatusChanged {
        streamer_id: Snowflake,
        is_live: bool,
        channel_name: Option<String>,
    },
}

impl RoomEvent {
    /// Target room, `None` for platform-wide events
    pub fn room(&self) -> Option<Snowflake> {
        match self {
            Self::GiftReceived { streamer_id, .. } | Self::GiftListUpdated { streamer_id, .. } => {
                Some(*streamer_id)
            }
            Self::StreamerStatusChanged { .. } => None,
        }
    }

    pub fn streamer_id(&self) -> Snowflake {
        match self {
            Self::GiftReceived { streamer_id, .. }
            | Self::GiftListUpdated { streamer_id, .. }
            | Self::StreamerStatusChanged { streamer_id, .. } => *streamer_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GiftReceived { .. } => "GIFT_RECEIVED",
            Self::GiftListUpdated { .. } => "GIFT_LIST_UPDATED",
            Self::StreamerStatusChanged { .. } => "STREAMER_STATUS_CHANGED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_change_is_platform_wide() {
        let event = RoomEvent::StreamerStatusChanged {
            streamer_id: Snowflake::new(5),
            is_live: true,
            channel_name: Some("lofi".into()),
        };
        assert_eq!(event.room(), None);
        assert_eq!(event.streamer_id(), Snowflake::new(5));
    }

    #[test]
    fn test_gift_events_target_room() {
        let event = RoomEvent::GiftReceived {
            streamer_id: Snowflake::new(5),
            payload: json!({"name": "Rose"}),
        };
        assert_eq!(event.room(), Some(Snowflake::new(5)));
        assert_eq!(event.name(), "GIFT_RECEIVED");
    }
}
