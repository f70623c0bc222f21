//! `stream-heartbeat` handler

use super::HandlerResult;
use crate::connection::Connection;
use crate::protocol::CloseCode;
use live_core::Snowflake;
use std::sync::Arc;

pub struct HeartbeatHandler;

impl HeartbeatHandler {
    /// Record the streamer's liveness on the session; nothing is broadcast
    pub fn handle(
        connection: &Arc<Connection>,
        streamer_id: Snowflake,
        timestamp: Option<i64>,
    ) -> HandlerResult<Option<CloseCode>> {
        connection.record_stream_heartbeat(streamer_id, timestamp);

        tracing::trace!(
            connection_id = %connection.id(),
            streamer_id = %streamer_id,
            timestamp = ?timestamp,
            "Stream heartbeat"
        );

        Ok(None)
    }
}
