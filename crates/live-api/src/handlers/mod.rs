//! Route handlers, one module per area

pub mod coins;
pub mod gifts;
pub mod health;
pub mod levels;
pub mod spectators;
pub mod streamers;
pub mod streaming;
