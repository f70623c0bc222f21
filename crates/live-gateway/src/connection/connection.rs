//! Individual WebSocket connection

use crate::connection::SessionState;
use crate::protocol::{CloseCode, ServerEvent};
use live_core::Snowflake;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Notify};
use uuid::Uuid;

/// A single WebSocket connection
pub struct Connection {
    id: Uuid,

    session: Mutex<SessionState>,

    /// Outbound queue drained by the socket's send task
    sender: mpsc::Sender<ServerEvent>,

    /// Last frame of any kind received from the client
    last_activity: Mutex<Instant>,

    /// Last `stream-heartbeat` as (streamer, client timestamp)
    stream_heartbeat: Mutex<Option<(Snowflake, Option<i64>)>>,

    /// Set when the server decides to close this socket
    close_reason: Mutex<Option<CloseCode>>,
    close_signal: Notify,

    connected_at: Instant,
}

impl Connection {
    pub fn new(id: Uuid, sender: mpsc::Sender<ServerEvent>) -> Arc<Self> {
        Arc::new(Self {
            id,
            session: Mutex::new(SessionState::Connected),
            sender,
            last_activity: Mutex::new(Instant::now()),
            stream_heartbeat: Mutex::new(None),
            close_reason: Mutex::new(None),
            close_signal: Notify::new(),
            connected_at: Instant::now(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session(&self) -> SessionState {
        self.session.lock().clone()
    }

    pub fn room(&self) -> Option<Snowflake> {
        self.session.lock().room()
    }

    /// Record the room this session now watches and run `register` under the session lock
    ///
    /// Returns `None` without calling `register` once the session is disconnected, so a
    /// join can never land in presence after [`Connection::disconnect`] has left it.
    pub fn enter_room<R>(
        &self,
        room: Snowflake,
        account_id: Option<Snowflake>,
        display_name: String,
        register: impl FnOnce() -> R,
    ) -> Option<R> {
        let mut session = self.session.lock();
        if !session.join(room, account_id, display_name) {
            return None;
        }
        Some(register())
    }

    /// Mark the session disconnected and run `unregister` under the session lock
    pub fn disconnect<R>(&self, unregister: impl FnOnce() -> R) -> R {
        let mut session = self.session.lock();
        session.disconnect();
        unregister()
    }

    pub fn mark_disconnected(&self) {
        self.disconnect(|| ());
    }

    pub fn touch(&self) {
        *self.last_activity.lock() = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_activity.lock().elapsed()
    }

    pub fn record_stream_heartbeat(&self, streamer_id: Snowflake, timestamp: Option<i64>) {
        *self.stream_heartbeat.lock() = Some((streamer_id, timestamp));
        self.touch();
    }

    pub fn stream_heartbeat(&self) -> Option<(Snowflake, Option<i64>)> {
        *self.stream_heartbeat.lock()
    }

    /// Queue an event without waiting
    ///
    /// A full queue drops the event for this client only.
    pub fn try_send(&self, event: ServerEvent) -> Result<(), mpsc::error::TrySendError<ServerEvent>> {
        self.sender.try_send(event)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Ask the socket task to close with `code`
    pub fn close(&self, code: CloseCode) {
        let mut reason = self.close_reason.lock();
        if reason.is_none() {
            *reason = Some(code);
            self.close_signal.notify_one();
        }
    }

    /// Resolves once [`Connection::close`] has been called
    pub async fn closed(&self) -> CloseCode {
        loop {
            let reason = *self.close_reason.lock();
            if let Some(code) = reason {
                return code;
            }
            self.close_signal.notified().await;
        }
    }

    pub fn age(&self) -> Duration {
        self.connected_at.elapsed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("session", &*self.session.lock())
            .field("age", &self.age())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_starts_connected() {
        let (tx, _rx) = mpsc::channel(4);
        let conn = Connection::new(Uuid::new_v4(), tx);

        assert_eq!(conn.session(), SessionState::Connected);
        assert_eq!(conn.room(), None);
        assert!(conn.stream_heartbeat().is_none());
    }

    #[tokio::test]
    async fn test_heartbeat_recorded() {
        let (tx, _rx) = mpsc::channel(4);
        let conn = Connection::new(Uuid::new_v4(), tx);

        conn.record_stream_heartbeat(Snowflake::new(5), Some(1_700_000_000_000));
        assert_eq!(conn.stream_heartbeat(), Some((Snowflake::new(5), Some(1_700_000_000_000))));
        assert!(conn.idle_for() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_full_queue_drops() {
        let (tx, mut rx) = mpsc::channel(1);
        let conn = Connection::new(Uuid::new_v4(), tx);

        conn.try_send(ServerEvent::NewMessage(serde_json::json!("one"))).unwrap();
        assert!(conn.try_send(ServerEvent::NewMessage(serde_json::json!("two"))).is_err());

        assert_eq!(rx.recv().await, Some(ServerEvent::NewMessage(serde_json::json!("one"))));
    }

    #[tokio::test]
    async fn test_close_wakes_waiter() {
        let (tx, _rx) = mpsc::channel(1);
        let conn = Connection::new(Uuid::new_v4(), tx);

        let waiter = {
            let conn = conn.clone();
            tokio::spawn(async move { conn.closed().await })
        };
        conn.close(CloseCode::SessionTimeout);
        conn.close(CloseCode::UnknownError);

        assert_eq!(waiter.await.unwrap(), CloseCode::SessionTimeout);
    }

    #[tokio::test]
    async fn test_enter_room_after_disconnect_skips_register() {
        let (tx, _rx) = mpsc::channel(1);
        let conn = Connection::new(Uuid::new_v4(), tx);

        assert_eq!(conn.enter_room(Snowflake::new(1), None, "a".into(), || 7), Some(7));
        assert_eq!(conn.room(), Some(Snowflake::new(1)));

        assert_eq!(conn.disconnect(|| "left"), "left");
        let mut registered = false;
        assert_eq!(
            conn.enter_room(Snowflake::new(2), None, "a".into(), || registered = true),
            None
        );
        assert!(!registered);
        assert!(conn.session().is_disconnected());
    }
}
