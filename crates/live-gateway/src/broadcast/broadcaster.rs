//! Room broadcaster
//!
//! Resolves an audience through the presence registry and queues events on each
//! member's connection. Also the [`EventPublisher`] the service layer talks to, so
//! HTTP-originated gift and stream events reach sockets without a network hop.

use crate::connection::ConnectionManager;
use crate::presence::PresenceRegistry;
use crate::protocol::ServerEvent;
use async_trait::async_trait;
use live_core::{EventPublisher, RepoResult, RoomEvent, Snowflake};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RoomBroadcaster {
    presence: Arc<PresenceRegistry>,
    connections: Arc<ConnectionManager>,
}

impl RoomBroadcaster {
    pub fn new(presence: Arc<PresenceRegistry>, connections: Arc<ConnectionManager>) -> Self {
        Self {
            presence,
            connections,
        }
    }

    /// Queue `event` for every viewer of `room`
    ///
    /// Duplicate connection ids are impossible in a room, so nobody gets it twice.
    pub fn to_room(&self, room: Snowflake, event: &ServerEvent) -> usize {
        let members = self.presence.connections_in(room);
        let delivered = self.connections.send_many(&members, event);

        tracing::trace!(
            room = %room,
            event = event.name(),
            members = members.len(),
            delivered,
            "Room broadcast"
        );
        delivered
    }

    /// Queue `event` for every open connection
    pub fn to_all(&self, event: &ServerEvent) -> usize {
        let delivered = self.connections.broadcast(event);
        tracing::trace!(event = event.name(), delivered, "Platform broadcast");
        delivered
    }

    pub fn to_connection(&self, connection_id: Uuid, event: ServerEvent) -> bool {
        self.connections.send_to(connection_id, event)
    }
}

#[async_trait]
impl EventPublisher for RoomBroadcaster {
    async fn publish(&self, event: RoomEvent) -> RepoResult<usize> {
        let room = event.room();
        let server_event = ServerEvent::from(event);

        let delivered = match room {
            Some(room) => self.to_room(room, &server_event),
            None => self.to_all(&server_event),
        };
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::mpsc;

    struct Fixture {
        presence: Arc<PresenceRegistry>,
        connections: Arc<ConnectionManager>,
        broadcaster: RoomBroadcaster,
    }

    fn fixture() -> Fixture {
        let presence = Arc::new(PresenceRegistry::new());
        let connections = ConnectionManager::new_shared();
        let broadcaster = RoomBroadcaster::new(presence.clone(), connections.clone());
        Fixture {
            presence,
            connections,
            broadcaster,
        }
    }

    fn viewer(f: &Fixture, room: Option<i64>) -> (Uuid, mpsc::Receiver<ServerEvent>) {
        let (tx, rx) = mpsc::channel(8);
        let conn = f.connections.add_connection(tx);
        if let Some(room) = room {
            f.presence.join(Snowflake::new(room), conn.id(), None, "v");
        }
        (conn.id(), rx)
    }

    #[tokio::test]
    async fn test_room_broadcast_skips_other_rooms() {
        let f = fixture();
        let (_, mut a) = viewer(&f, Some(1));
        let (_, mut b) = viewer(&f, Some(1));
        let (_, mut other) = viewer(&f, Some(2));

        let event = ServerEvent::NewMessage(json!({"text": "hi"}));
        assert_eq!(f.broadcaster.to_room(Snowflake::new(1), &event), 2);

        assert_eq!(a.recv().await, Some(event.clone()));
        assert_eq!(b.recv().await, Some(event));
        assert!(other.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_empty_room_is_a_noop() {
        let f = fixture();
        let event = ServerEvent::NewMessage(json!(null));
        assert_eq!(f.broadcaster.to_room(Snowflake::new(99), &event), 0);
    }

    #[tokio::test]
    async fn test_publish_routes_by_room() {
        let f = fixture();
        let (_, mut watcher) = viewer(&f, Some(5));
        let (_, mut lobby) = viewer(&f, None);

        let delivered = f
            .broadcaster
            .publish(RoomEvent::GiftReceived {
                streamer_id: Snowflake::new(5),
                payload: json!({"giftName": "Rose"}),
            })
            .await
            .unwrap();
        assert_eq!(delivered, 1);
        assert_eq!(
            watcher.recv().await,
            Some(ServerEvent::GiftReceived(json!({"giftName": "Rose"})))
        );
        assert!(lobby.try_recv().is_err());

        let delivered = f
            .broadcaster
            .publish(RoomEvent::StreamerStatusChanged {
                streamer_id: Snowflake::new(5),
                is_live: false,
                channel_name: Some("ignored".into()),
            })
            .await
            .unwrap();
        assert_eq!(delivered, 2);
        let expected = ServerEvent::status_changed(Snowflake::new(5), false, None);
        assert_eq!(watcher.recv().await, Some(expected.clone()));
        assert_eq!(lobby.recv().await, Some(expected));
    }

    #[tokio::test]
    async fn test_to_connection() {
        let f = fixture();
        let (id, mut rx) = viewer(&f, None);
        assert!(f.broadcaster.to_connection(id, ServerEvent::NewMessage(json!(1))));
        assert_eq!(rx.recv().await, Some(ServerEvent::NewMessage(json!(1))));
    }
}
