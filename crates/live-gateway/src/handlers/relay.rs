//! Relays of client-originated room and platform events
//!
//! Payloads are forwarded untouched; the gateway does not validate chat or gift
//! contents that arrive over the socket.

use super::HandlerResult;
use crate::connection::Connection;
use crate::protocol::{CloseCode, ServerEvent, ViewerList};
use crate::server::GatewayState;
use live_core::Snowflake;
use std::sync::Arc;

pub struct RelayHandler;

impl RelayHandler {
    /// Forward `event` to every viewer of `room`, the sender included when it watches
    pub fn to_room(
        state: &GatewayState,
        connection: &Arc<Connection>,
        room: Snowflake,
        event: &ServerEvent,
    ) -> HandlerResult<Option<CloseCode>> {
        let delivered = state.broadcaster().to_room(room, event);

        tracing::debug!(
            connection_id = %connection.id(),
            streamer_id = %room,
            event = event.name(),
            delivered,
            "Relayed to room"
        );

        Ok(None)
    }

    /// Announce a live/offline transition to every connected client
    pub fn status(
        state: &GatewayState,
        connection: &Arc<Connection>,
        streamer_id: Snowflake,
        is_live: bool,
        channel_name: Option<String>,
    ) -> HandlerResult<Option<CloseCode>> {
        let event = ServerEvent::status_changed(streamer_id, is_live, channel_name);
        let delivered = state.broadcaster().to_all(&event);

        tracing::info!(
            connection_id = %connection.id(),
            streamer_id = %streamer_id,
            is_live,
            delivered,
            "Streamer status announced"
        );

        Ok(None)
    }

    /// Reply with the viewer list of `room` to the asking connection only
    pub fn viewers(
        state: &GatewayState,
        connection: &Arc<Connection>,
        room: Snowflake,
    ) -> HandlerResult<Option<CloseCode>> {
        let list = ViewerList::new(room, state.presence().list(room));
        state
            .broadcaster()
            .to_connection(connection.id(), ServerEvent::ViewersList(list));
        Ok(None)
    }
}
