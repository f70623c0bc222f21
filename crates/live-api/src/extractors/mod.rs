//! Axum extractors for request handling

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::{parse_id, IdPath, LevelPath};
pub use validated::ValidatedJson;
