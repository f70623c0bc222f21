//! Client event handlers
//!
//! Routes each decoded [`ClientEvent`] to the handler for its kind.

mod error;
mod heartbeat;
mod join;
mod relay;

pub use error::{HandlerError, HandlerResult};
pub use heartbeat::HeartbeatHandler;
pub use join::JoinHandler;
pub use relay::RelayHandler;

use crate::connection::Connection;
use crate::protocol::{ClientEvent, CloseCode, ServerEvent};
use crate::server::GatewayState;
use std::sync::Arc;

pub struct EventDispatcher;

impl EventDispatcher {
    /// Handle one client event; `Ok(Some(code))` asks the socket to close
    pub fn dispatch(
        state: &GatewayState,
        connection: &Arc<Connection>,
        event: ClientEvent,
    ) -> HandlerResult<Option<CloseCode>> {
        if connection.session().is_disconnected() {
            return Err(HandlerError::ConnectionClosed);
        }

        tracing::trace!(
            connection_id = %connection.id(),
            event = event.name(),
            "Client event"
        );

        match event {
            ClientEvent::JoinChat(join) => JoinHandler::handle(state, connection, &join),
            ClientEvent::SendMessage {
                streamer_id,
                message,
            } => RelayHandler::to_room(
                state,
                connection,
                streamer_id,
                &ServerEvent::NewMessage(message),
            ),
            ClientEvent::SendGift {
                streamer_id,
                gift_data,
            } => RelayHandler::to_room(
                state,
                connection,
                streamer_id,
                &ServerEvent::GiftReceived(gift_data),
            ),
            ClientEvent::NewGiftAdded { streamer_id, gift } => RelayHandler::to_room(
                state,
                connection,
                streamer_id,
                &ServerEvent::GiftListUpdated(gift),
            ),
            ClientEvent::StreamerWentLive {
                streamer_id,
                channel_name,
            } => RelayHandler::status(state, connection, streamer_id, true, channel_name),
            ClientEvent::StreamerWentOffline { streamer_id } => {
                RelayHandler::status(state, connection, streamer_id, false, None)
            }
            ClientEvent::StreamHeartbeat {
                streamer_id,
                timestamp,
            } => HeartbeatHandler::handle(connection, streamer_id, timestamp),
            ClientEvent::GetViewers(room) => RelayHandler::viewers(state, connection, room),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ViewerList;
    use live_common::AppConfig;
    use live_core::Snowflake;
    use serde_json::json;
    use std::collections::HashMap;
    use tokio::sync::mpsc;

    fn state() -> GatewayState {
        let vars: HashMap<&str, &str> = [
            ("SERVER_PORT", "0"),
            ("JWT_SECRET", "test-secret-key-that-is-long-enough"),
            ("LEDGER_BACKEND", "memory"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string())).unwrap();
        GatewayState::new(Arc::new(config))
    }

    fn connect(state: &GatewayState) -> (Arc<Connection>, mpsc::Receiver<ServerEvent>) {
        let (tx, rx) = mpsc::channel(16);
        (state.connection_manager().add_connection(tx), rx)
    }

    fn drain(rx: &mut mpsc::Receiver<ServerEvent>) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn join(state: &GatewayState, conn: &Arc<Connection>, data: serde_json::Value) {
        let event = ClientEvent::from_json(&json!({"event": "join-chat", "data": data}).to_string()).unwrap();
        EventDispatcher::dispatch(state, conn, event).unwrap();
    }

    fn viewer_count(event: &ServerEvent) -> usize {
        match event {
            ServerEvent::ViewersUpdated(list) | ServerEvent::ViewersList(list) => list.count,
            other => panic!("expected a viewer list, got {}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_join_broadcasts_viewer_list() {
        let state = state();
        let (a, mut rx_a) = connect(&state);
        let (b, mut rx_b) = connect(&state);

        join(&state, &a, json!({"streamerId": "10", "userId": "1", "userName": "ana"}));
        join(&state, &b, json!("10"));

        let a_events = drain(&mut rx_a);
        assert_eq!(a_events.len(), 2);
        assert_eq!(viewer_count(&a_events[1]), 2);

        let b_events = drain(&mut rx_b);
        let ServerEvent::ViewersUpdated(list) = &b_events[0] else {
            panic!("expected viewers-updated");
        };
        assert_eq!(list.viewers[0].display_name, "ana");
        assert_eq!(list.viewers[1].display_name, "Guest");
        assert_eq!(a.room(), Some(Snowflake::new(10)));
    }

    #[tokio::test]
    async fn test_switching_rooms_updates_vacated_room() {
        let state = state();
        let (a, mut rx_a) = connect(&state);
        let (b, mut rx_b) = connect(&state);
        join(&state, &a, json!("1"));
        join(&state, &b, json!("1"));
        drain(&mut rx_a);
        drain(&mut rx_b);

        join(&state, &a, json!("2"));

        let b_events = drain(&mut rx_b);
        assert_eq!(b_events.len(), 1);
        assert_eq!(viewer_count(&b_events[0]), 1);
        assert_eq!(state.presence().list(Snowflake::new(1)).len(), 1);
        assert_eq!(a.room(), Some(Snowflake::new(2)));
    }

    #[tokio::test]
    async fn test_rejoin_same_room_only_answers_sender() {
        let state = state();
        let (a, mut rx_a) = connect(&state);
        let (b, mut rx_b) = connect(&state);
        join(&state, &a, json!("1"));
        join(&state, &b, json!("1"));
        drain(&mut rx_a);
        drain(&mut rx_b);

        join(&state, &a, json!("1"));

        assert_eq!(drain(&mut rx_a).len(), 1);
        assert!(drain(&mut rx_b).is_empty());
        assert_eq!(state.presence().list(Snowflake::new(1)).len(), 2);
    }

    #[tokio::test]
    async fn test_message_reaches_room_only() {
        let state = state();
        let (a, mut rx_a) = connect(&state);
        let (b, mut rx_b) = connect(&state);
        join(&state, &a, json!("1"));
        join(&state, &b, json!("2"));
        drain(&mut rx_a);
        drain(&mut rx_b);

        let event = ClientEvent::SendMessage {
            streamer_id: Snowflake::new(1),
            message: json!({"text": "hi"}),
        };
        EventDispatcher::dispatch(&state, &b, event).unwrap();

        assert_eq!(drain(&mut rx_a), vec![ServerEvent::NewMessage(json!({"text": "hi"}))]);
        assert!(drain(&mut rx_b).is_empty());
    }

    #[tokio::test]
    async fn test_status_goes_to_everyone() {
        let state = state();
        let (a, mut rx_a) = connect(&state);
        let (_b, mut rx_b) = connect(&state);

        let event = ClientEvent::StreamerWentLive {
            streamer_id: Snowflake::new(4),
            channel_name: Some("cozy".into()),
        };
        EventDispatcher::dispatch(&state, &a, event).unwrap();

        let expected = ServerEvent::status_changed(Snowflake::new(4), true, Some("cozy".into()));
        assert_eq!(drain(&mut rx_a), vec![expected.clone()]);
        assert_eq!(drain(&mut rx_b), vec![expected]);
    }

    #[tokio::test]
    async fn test_get_viewers_answers_requester() {
        let state = state();
        let (a, mut rx_a) = connect(&state);
        let (b, mut rx_b) = connect(&state);
        join(&state, &a, json!("3"));
        drain(&mut rx_a);

        EventDispatcher::dispatch(&state, &b, ClientEvent::GetViewers(Snowflake::new(3))).unwrap();

        let events = drain(&mut rx_b);
        assert_eq!(events.len(), 1);
        assert_eq!(viewer_count(&events[0]), 1);
        assert!(drain(&mut rx_a).is_empty());

        EventDispatcher::dispatch(&state, &b, ClientEvent::GetViewers(Snowflake::new(8))).unwrap();
        assert_eq!(
            drain(&mut rx_b),
            vec![ServerEvent::ViewersList(ViewerList::new(Snowflake::new(8), Vec::new()))]
        );
    }

    #[tokio::test]
    async fn test_heartbeat_is_recorded_silently() {
        let state = state();
        let (a, mut rx_a) = connect(&state);

        let event = ClientEvent::StreamHeartbeat {
            streamer_id: Snowflake::new(2),
            timestamp: Some(42),
        };
        EventDispatcher::dispatch(&state, &a, event).unwrap();

        assert_eq!(a.stream_heartbeat(), Some((Snowflake::new(2), Some(42))));
        assert!(drain(&mut rx_a).is_empty());
    }

    #[tokio::test]
    async fn test_disconnected_session_rejects_events() {
        let state = state();
        let (a, _rx) = connect(&state);
        a.mark_disconnected();

        let err = EventDispatcher::dispatch(&state, &a, ClientEvent::GetViewers(Snowflake::new(1))).unwrap_err();
        assert!(matches!(err, HandlerError::ConnectionClosed));
    }
}
