//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions for rows read back from PostgreSQL.

mod account;
mod gift;
mod level_tier;
mod progress;
mod transaction;

pub use account::parse_role;
