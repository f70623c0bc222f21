//! Connection manager
//!
//! Every open socket by connection id. Room membership lives in the presence
//! registry; this map only answers "who is connected".

use super::Connection;
use crate::protocol::ServerEvent;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

#[derive(Default)]
pub struct ConnectionManager {
    connections: DashMap<Uuid, Arc<Connection>>,
}

impl ConnectionManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection under a fresh id
    pub fn add_connection(&self, sender: mpsc::Sender<ServerEvent>) -> Arc<Connection> {
        let connection = Connection::new(Uuid::new_v4(), sender);
        self.connections.insert(connection.id(), connection.clone());

        tracing::debug!(connection_id = %connection.id(), "Connection added");

        connection
    }

    pub fn remove_connection(&self, connection_id: Uuid) -> Option<Arc<Connection>> {
        let removed = self.connections.remove(&connection_id).map(|(_, c)| c);
        if removed.is_some() {
            tracing::debug!(connection_id = %connection_id, "Connection removed");
        }
        removed
    }

    pub fn get(&self, connection_id: Uuid) -> Option<Arc<Connection>> {
        self.connections.get(&connection_id).map(|r| r.value().clone())
    }

    /// Queue `event` for one connection; false when it is gone or its queue is full
    pub fn send_to(&self, connection_id: Uuid, event: ServerEvent) -> bool {
        let Some(connection) = self.get(connection_id) else {
            return false;
        };
        match connection.try_send(event) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Dropped outbound event"
                );
                false
            }
        }
    }

    /// Queue `event` for every listed connection, returning how many accepted it
    pub fn send_many(&self, connection_ids: &[Uuid], event: &ServerEvent) -> usize {
        connection_ids
            .iter()
            .filter(|id| self.send_to(**id, event.clone()))
            .count()
    }

    /// Queue `event` for every open connection
    pub fn broadcast(&self, event: &ServerEvent) -> usize {
        let ids: Vec<Uuid> = self.connections.iter().map(|r| *r.key()).collect();
        self.send_many(&ids, event)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Connections that have been silent for at least `timeout`
    pub fn idle_connections(&self, timeout: Duration) -> Vec<Arc<Connection>> {
        self.connections
            .iter()
            .filter(|r| r.value().idle_for() >= timeout)
            .map(|r| r.value().clone())
            .collect()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .finish()
    }
}
