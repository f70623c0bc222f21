//! # live-gateway
//!
//! WebSocket gateway for stream rooms: who is watching which streamer, chat and gift
//! fan-out, and platform-wide live/offline announcements. The same server also mounts
//! the REST API from `live-api`, with the gateway acting as its event publisher.

pub mod broadcast;
pub mod connection;
pub mod handlers;
pub mod presence;
pub mod protocol;
pub mod server;

pub use server::{create_server, run, GatewayState};
