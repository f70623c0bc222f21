//! WebSocket handler
//!
//! One task pair per socket: the receive loop decodes and dispatches client events,
//! the send task drains the connection's outbound queue. Whichever ends first ends
//! the session, and presence cleanup always runs afterwards.

use crate::connection::Connection;
use crate::handlers::EventDispatcher;
use crate::protocol::{ClientEvent, CloseCode, ServerEvent, ViewerList};
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Upgrade an HTTP request to a gateway session
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let (tx, mut rx) = mpsc::channel::<ServerEvent>(state.config().gateway.outbound_buffer.max(1));
    let connection = state.connection_manager().add_connection(tx);
    let connection_id = connection.id();

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let state_recv = state.clone();
    let connection_recv = connection.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            connection_recv.touch();
            match msg {
                Ok(Message::Text(text)) => {
                    if let Err(close_code) = handle_text_message(&state_recv, &connection_recv, &text) {
                        return Some(close_code);
                    }
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(connection_id = %connection_recv.id(), "Binary frames not supported");
                    return Some(CloseCode::UnsupportedFrame);
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Ok(Message::Close(_)) => {
                    tracing::info!(connection_id = %connection_recv.id(), "Client closed connection");
                    return None;
                }
                Err(e) => {
                    tracing::warn!(connection_id = %connection_recv.id(), error = %e, "WebSocket error");
                    return None;
                }
            }
        }
        None
    });

    let connection_send = connection.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                event = rx.recv() => {
                    let Some(event) = event else { break };
                    match event.to_json() {
                        Ok(json) => {
                            if ws_sink.send(Message::Text(json.into())).await.is_err() {
                                tracing::debug!(connection_id = %connection_send.id(), "Socket write failed");
                                return;
                            }
                        }
                        Err(e) => {
                            tracing::error!(event = event.name(), error = %e, "Failed to encode event");
                        }
                    }
                }
                code = connection_send.closed() => {
                    tracing::debug!(connection_id = %connection_send.id(), close_code = %code, "Closing socket");
                    let _ = ws_sink.send(Message::Close(Some(code.frame()))).await;
                    break;
                }
            }
        }
        let _ = ws_sink.close().await;
    });

    tokio::select! {
        result = &mut recv_task => {
            if let Ok(Some(code)) = result {
                connection.close(code);
                // let the send task flush the close frame
                let _ = tokio::time::timeout(Duration::from_secs(1), &mut send_task).await;
            }
            send_task.abort();
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    }

    cleanup_connection(&state, &connection);
}

fn handle_text_message(
    state: &GatewayState,
    connection: &Arc<Connection>,
    text: &str,
) -> Result<(), CloseCode> {
    let event = match ClientEvent::decode(text) {
        Ok(Some(event)) => event,
        Ok(None) => {
            tracing::debug!(connection_id = %connection.id(), "Ignoring unknown event");
            return Ok(());
        }
        Err(e) => {
            tracing::debug!(connection_id = %connection.id(), error = %e, "Failed to parse event");
            return Err(CloseCode::DecodeError);
        }
    };

    match EventDispatcher::dispatch(state, connection, event) {
        Ok(Some(code)) => Err(code),
        Ok(None) => Ok(()),
        Err(e) => {
            tracing::warn!(connection_id = %connection.id(), error = %e, "Handler error");
            Err(e.to_close_code().unwrap_or(CloseCode::UnknownError))
        }
    }
}

/// Leave presence, tell the vacated room, and forget the connection
pub(crate) fn cleanup_connection(state: &GatewayState, connection: &Arc<Connection>) {
    let left = connection.disconnect(|| state.presence().leave(connection.id()));

    if let Some((room, remaining)) = left {
        if !remaining.is_empty() {
            state.broadcaster().to_room(
                room,
                &ServerEvent::ViewersUpdated(ViewerList::new(room, remaining)),
            );
        }
        tracing::debug!(connection_id = %connection.id(), streamer_id = %room, "Left room on disconnect");
    }

    state.connection_manager().remove_connection(connection.id());
    tracing::info!(connection_id = %connection.id(), "Connection cleaned up");
}

/// Close connections that have been silent longer than the configured timeout
pub(crate) fn spawn_idle_reaper(state: GatewayState) -> Option<tokio::task::JoinHandle<()>> {
    let timeout_secs = state.config().gateway.idle_timeout_secs;
    if timeout_secs == 0 {
        return None;
    }
    let timeout = Duration::from_secs(timeout_secs);

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(timeout / 2);
        loop {
            ticker.tick().await;
            for connection in state.connection_manager().idle_connections(timeout) {
                tracing::info!(
                    connection_id = %connection.id(),
                    idle_ms = connection.idle_for().as_millis(),
                    "Closing idle connection"
                );
                connection.close(CloseCode::SessionTimeout);
            }
        }
    }))
}
