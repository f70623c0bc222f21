//! Gateway state

use crate::broadcast::RoomBroadcaster;
use crate::connection::ConnectionManager;
use crate::presence::PresenceRegistry;
use live_common::AppConfig;
use std::sync::Arc;

/// Shared by every socket task; cheap to clone
#[derive(Clone)]
pub struct GatewayState {
    connection_manager: Arc<ConnectionManager>,
    presence: Arc<PresenceRegistry>,
    broadcaster: Arc<RoomBroadcaster>,
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Fresh, empty presence and connection tables
    pub fn new(config: Arc<AppConfig>) -> Self {
        let connection_manager = ConnectionManager::new_shared();
        let presence = Arc::new(PresenceRegistry::new());
        let broadcaster = Arc::new(RoomBroadcaster::new(
            presence.clone(),
            connection_manager.clone(),
        ));

        Self {
            connection_manager,
            presence,
            broadcaster,
            config,
        }
    }

    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connection_manager
    }

    pub fn presence(&self) -> &PresenceRegistry {
        &self.presence
    }

    pub fn broadcaster(&self) -> &RoomBroadcaster {
        &self.broadcaster
    }

    /// The broadcaster as a handle the service layer can hold
    pub fn shared_broadcaster(&self) -> Arc<RoomBroadcaster> {
        self.broadcaster.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connection_manager", &self.connection_manager)
            .field("rooms", &self.presence.room_count())
            .field("config", &"AppConfig")
            .finish()
    }
}
