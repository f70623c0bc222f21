//! # live-api
//!
//! REST API built with Axum: gift catalog and transfers, coins, progress, live status
//! and level tiers. The router is served by the gateway binary next to the WebSocket
//! endpoint.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use routes::{create_router, health_routes};
pub use server::{create_app, create_service_context};
pub use state::AppState;
