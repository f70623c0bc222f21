//! Publisher that keeps events instead of delivering them

use async_trait::async_trait;
use parking_lot::Mutex;

use live_core::events::RoomEvent;
use live_core::traits::{EventPublisher, RepoResult};

/// Collects published events; used where no gateway is attached
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<RoomEvent>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything published so far
    pub fn take(&self) -> Vec<RoomEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: RoomEvent) -> RepoResult<usize> {
        self.events.lock().push(event);
        Ok(0)
    }
}
