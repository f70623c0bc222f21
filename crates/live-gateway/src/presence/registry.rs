//! Presence registry
//!
//! Room → viewers, kept strictly from connection lifecycle events. Each room's list
//! is mutated under its `DashMap` entry lock, so joins and leaves on one room are
//! serialized while other rooms proceed in parallel. A room exists only while it has
//! at least one viewer.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use live_core::Snowflake;
use serde::Serialize;
use uuid::Uuid;

/// One connection watching a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceEntry {
    pub connection_id: Uuid,
    pub account_id: Option<Snowflake>,
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
}

/// Result of a join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Viewers of the joined room, in join order
    pub viewers: Vec<PresenceEntry>,
    /// Room the connection left to get here, with its remaining viewers
    pub vacated: Option<(Snowflake, Vec<PresenceEntry>)>,
    /// False when the connection was already in the room
    pub changed: bool,
}

#[derive(Debug, Default)]
pub struct PresenceRegistry {
    rooms: DashMap<Snowflake, Vec<PresenceEntry>>,
    /// connection → the room it last joined
    memberships: DashMap<Uuid, Snowflake>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to `room`
    ///
    /// Joining the room a connection is already in changes nothing. Joining another
    /// room leaves the current one first.
    pub fn join(
        &self,
        room: Snowflake,
        connection_id: Uuid,
        account_id: Option<Snowflake>,
        display_name: impl Into<String>,
    ) -> JoinOutcome {
        let vacated = match self.memberships.get(&connection_id).map(|r| *r) {
            Some(current) if current == room => {
                return JoinOutcome {
                    viewers: self.list(room),
                    vacated: None,
                    changed: false,
                };
            }
            Some(_) => self.leave(connection_id),
            None => None,
        };

        let entry = PresenceEntry {
            connection_id,
            account_id,
            display_name: display_name.into(),
            joined_at: Utc::now(),
        };

        let viewers = {
            let mut viewers = self.rooms.entry(room).or_default();
            if !viewers.iter().any(|e| e.connection_id == connection_id) {
                viewers.push(entry);
            }
            viewers.value().clone()
        };
        self.memberships.insert(connection_id, room);

        JoinOutcome {
            viewers,
            vacated,
            changed: true,
        }
    }

    /// Remove a connection from the room it last joined
    ///
    /// Returns that room and its remaining viewers; an emptied room is dropped.
    pub fn leave(&self, connection_id: Uuid) -> Option<(Snowflake, Vec<PresenceEntry>)> {
        let (_, room) = self.memberships.remove(&connection_id)?;

        let remaining = match self.rooms.entry(room) {
            Entry::Occupied(mut occupied) => {
                occupied.get_mut().retain(|e| e.connection_id != connection_id);
                if occupied.get().is_empty() {
                    occupied.remove();
                    Vec::new()
                } else {
                    occupied.get().clone()
                }
            }
            Entry::Vacant(_) => Vec::new(),
        };

        Some((room, remaining))
    }

    /// Viewers of `room` in join order; empty when nobody is watching
    pub fn list(&self, room: Snowflake) -> Vec<PresenceEntry> {
        self.rooms
            .get(&room)
            .map(|v| v.value().clone())
            .unwrap_or_default()
    }

    /// Connection ids in `room`
    pub fn connections_in(&self, room: Snowflake) -> Vec<Uuid> {
        self.rooms
            .get(&room)
            .map(|v| v.iter().map(|e| e.connection_id).collect())
            .unwrap_or_default()
    }

    pub fn room_of(&self, connection_id: Uuid) -> Option<Snowflake> {
        self.memberships.get(&connection_id).map(|r| *r)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Drop every room, used at shutdown
    pub fn clear(&self) {
        self.rooms.clear();
        self.memberships.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn room(id: i64) -> Snowflake {
        Snowflake::new(id)
    }

    #[test]
    fn test_join_appends_in_order() {
        let registry = PresenceRegistry::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        registry.join(room(1), a, None, "a");
        let outcome = registry.join(room(1), b, Some(Snowflake::new(9)), "b");

        let ids: Vec<Uuid> = outcome.viewers.iter().map(|e| e.connection_id).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(outcome.changed);
        assert!(outcome.vacated.is_none());
    }

    #[test]
    fn test_join_is_idempotent() {
        let registry = PresenceRegistry::new();
        let a = Uuid::new_v4();

        registry.join(room(1), a, None, "a");
        let again = registry.join(room(1), a, None, "a");

        assert!(!again.changed);
        assert_eq!(again.viewers.len(), 1);
    }

    #[test]
    fn test_same_account_on_two_connections() {
        let registry = PresenceRegistry::new();
        let account = Some(Snowflake::new(77));
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

        registry.join(room(1), first, account, "ana");
        let outcome = registry.join(room(1), second, account, "ana");
        assert_eq!(outcome.viewers.len(), 2);

        let (left_room, remaining) = registry.leave(first).unwrap();
        assert_eq!(left_room, room(1));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].connection_id, second);
    }

    #[test]
    fn test_rejoin_elsewhere_leaves_first() {
        let registry = PresenceRegistry::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        registry.join(room(1), a, None, "a");
        registry.join(room(1), b, None, "b");

        let outcome = registry.join(room(2), a, None, "a");

        let (vacated, remaining) = outcome.vacated.unwrap();
        assert_eq!(vacated, room(1));
        assert_eq!(remaining.len(), 1);
        assert_eq!(registry.list(room(1)).len(), 1);
        assert_eq!(registry.room_of(a), Some(room(2)));
    }

    #[test]
    fn test_empty_room_is_dropped() {
        let registry = PresenceRegistry::new();
        let a = Uuid::new_v4();
        registry.join(room(1), a, None, "a");
        assert_eq!(registry.room_count(), 1);

        let (_, remaining) = registry.leave(a).unwrap();
        assert!(remaining.is_empty());
        assert_eq!(registry.room_count(), 0);
        assert!(registry.leave(a).is_none());
    }

    #[test]
    fn test_leave_without_join() {
        let registry = PresenceRegistry::new();
        assert!(registry.leave(Uuid::new_v4()).is_none());
        assert!(registry.list(room(3)).is_empty());
    }

    #[test]
    fn test_concurrent_joins_and_leaves() {
        let registry = Arc::new(PresenceRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let mut mine = Vec::new();
                    for _ in 0..50 {
                        let id = Uuid::new_v4();
                        registry.join(room(t % 2), id, None, "v");
                        mine.push(id);
                    }
                    for id in mine.iter().step_by(2) {
                        registry.leave(*id);
                    }
                    mine
                })
            })
            .collect();

        let mut survivors = 0;
        for handle in handles {
            let ids = handle.join().unwrap();
            survivors += ids.len() / 2;
        }

        let listed = registry.list(room(0)).len() + registry.list(room(1)).len();
        assert_eq!(listed, survivors);
    }
}
