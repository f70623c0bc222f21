//! Client and server events
//!
//! Both directions use adjacent tagging: the event name in `event`, the payload in
//! `data`. Payload objects are camelCase; room ids accept strings or numbers.

use live_core::{RoomEvent, Snowflake};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::presence::PresenceEntry;

/// Events a client may send
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Enter a streamer's room; leaves the current one first
    JoinChat(JoinChat),

    /// Chat line, forwarded to the room untouched
    SendMessage { streamer_id: Snowflake, message: Value },

    /// Gift notification, forwarded to the room untouched
    SendGift { streamer_id: Snowflake, gift_data: Value },

    /// A streamer added a catalog entry
    NewGiftAdded { streamer_id: Snowflake, gift: Value },

    StreamerWentLive {
        streamer_id: Snowflake,
        #[serde(default)]
        channel_name: Option<String>,
    },

    StreamerWentOffline { streamer_id: Snowflake },

    /// Liveness ping from a broadcasting streamer
    StreamHeartbeat {
        streamer_id: Snowflake,
        #[serde(default)]
        timestamp: Option<i64>,
    },

    /// Ask for a room's viewer list; the reply goes to the asker only
    GetViewers(Snowflake),
}

/// Just the name of an incoming frame
#[derive(Deserialize)]
struct Envelope {
    event: String,
}

impl ClientEvent {
    /// Every event name a client may send
    pub const NAMES: [&'static str; 8] = [
        "join-chat",
        "send-message",
        "send-gift",
        "new-gift-added",
        "streamer-went-live",
        "streamer-went-offline",
        "stream-heartbeat",
        "get-viewers",
    ];

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Decode a frame, yielding `None` for a well-formed frame with a name not in [`Self::NAMES`]
    ///
    /// Invalid JSON, a missing `event`, or a known event with a bad payload is an error.
    pub fn decode(text: &str) -> Result<Option<Self>, serde_json::Error> {
        let envelope: Envelope = serde_json::from_str(text)?;
        if !Self::NAMES.contains(&envelope.event.as_str()) {
            return Ok(None);
        }
        Self::from_json(text).map(Some)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinChat(_) => "join-chat",
            Self::SendMessage { .. } => "send-message",
            Self::SendGift { .. } => "send-gift",
            Self::NewGiftAdded { .. } => "new-gift-added",
            Self::StreamerWentLive { .. } => "streamer-went-live",
            Self::StreamerWentOffline { .. } => "streamer-went-offline",
            Self::StreamHeartbeat { .. } => "stream-heartbeat",
            Self::GetViewers(_) => "get-viewers",
        }
    }
}

/// `join-chat` payload: a bare room id, or an object with the viewer's identity
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JoinChat {
    Room(Snowflake),
    #[serde(rename_all = "camelCase")]
    Viewer {
        streamer_id: Snowflake,
        #[serde(default)]
        user_id: Option<Snowflake>,
        #[serde(default)]
        user_name: Option<String>,
    },
}

impl JoinChat {
    pub fn streamer_id(&self) -> Snowflake {
        match self {
            Self::Room(id) | Self::Viewer { streamer_id: id, .. } => *id,
        }
    }

    pub fn user_id(&self) -> Option<Snowflake> {
        match self {
            Self::Room(_) => None,
            Self::Viewer { user_id, .. } => *user_id,
        }
    }

    /// Display name, `"Guest"` when none was given
    pub fn user_name(&self) -> String {
        match self {
            Self::Viewer {
                user_name: Some(name),
                ..
            } if !name.trim().is_empty() => name.trim().to_string(),
            _ => "Guest".to_string(),
        }
    }
}

/// Viewer list of one room
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerList {
    pub streamer_id: Snowflake,
    pub count: usize,
    pub viewers: Vec<PresenceEntry>,
}

impl ViewerList {
    pub fn new(streamer_id: Snowflake, viewers: Vec<PresenceEntry>) -> Self {
        Self {
            streamer_id,
            count: viewers.len(),
            viewers,
        }
    }
}

/// Events the gateway sends
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    ViewersUpdated(ViewerList),
    NewMessage(Value),
    GiftReceived(Value),
    GiftListUpdated(Value),
    StreamerStatusChanged {
        streamer_id: Snowflake,
        is_live: bool,
        channel_name: Option<String>,
    },
    ViewersList(ViewerList),
}

impl ServerEvent {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn status_changed(streamer_id: Snowflake, is_live: bool, channel_name: Option<String>) -> Self {
        Self::StreamerStatusChanged {
            streamer_id,
            is_live,
            // offline announcements never carry a channel
            channel_name: if is_live { channel_name } else { None },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ViewersUpdated(_) => "viewers-updated",
            Self::NewMessage(_) => "new-message",
            Self::GiftReceived(_) => "gift-received",
            Self::GiftListUpdated(_) => "gift-list-updated",
            Self::StreamerStatusChanged { .. } => "streamer-status-changed",
            Self::ViewersList(_) => "viewers-list",
        }
    }
}

impl From<RoomEvent> for ServerEvent {
    fn from(event: RoomEvent) -> Self {
        match event {
            RoomEvent::GiftReceived { payload, .. } => Self::GiftReceived(payload),
            RoomEvent::GiftListUpdated { gift, .. } => Self::GiftListUpdated(gift),
            RoomEvent::StreamerStatusChanged {
                streamer_id,
                is_live,
                channel_name,
            } => Self::status_changed(streamer_id, is_live, channel_name),
        }
    }
}
