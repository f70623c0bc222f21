//! Integration test utilities for the live server
//!
//! Spawns the real server (REST API plus WebSocket gateway) over the in-memory
//! ledger and drives it with `reqwest` and `tokio-tungstenite`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
