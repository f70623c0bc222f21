//! `join-chat` handler

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::protocol::{CloseCode, JoinChat, ServerEvent, ViewerList};
use crate::server::GatewayState;
use std::sync::Arc;

pub struct JoinHandler;

impl JoinHandler {
    /// Move the connection into the requested room
    ///
    /// The joined room gets the new viewer list. A room the connection left to get
    /// here gets its shrunken list too, unless nobody is left in it.
    pub fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        join: &JoinChat,
    ) -> HandlerResult<Option<CloseCode>> {
        let room = join.streamer_id();
        let account_id = join.user_id();
        let display_name = join.user_name();

        let outcome = connection
            .enter_room(room, account_id, display_name.clone(), || {
                state
                    .presence()
                    .join(room, connection.id(), account_id, display_name)
            })
            .ok_or(HandlerError::ConnectionClosed)?;

        if let Some((vacated, remaining)) = outcome.vacated {
            if !remaining.is_empty() {
                state.broadcaster().to_room(
                    vacated,
                    &ServerEvent::ViewersUpdated(ViewerList::new(vacated, remaining)),
                );
            }
        }

        let list = ServerEvent::ViewersUpdated(ViewerList::new(room, outcome.viewers));
        if outcome.changed {
            state.broadcaster().to_room(room, &list);
        } else {
            state.broadcaster().to_connection(connection.id(), list);
        }

        tracing::info!(
            connection_id = %connection.id(),
            streamer_id = %room,
            account_id = ?account_id,
            rejoin = !outcome.changed,
            "Joined room"
        );

        Ok(None)
    }
}
