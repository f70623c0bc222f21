//! Path parameter extractors
//!
//! Ids arrive as decimal strings; anything else is a 400 before a handler runs.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use live_core::Snowflake;

use crate::response::ApiError;

/// Parse a path segment as a Snowflake, naming the parameter in the error
pub fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// A single id segment, e.g. `/gifts/:id`
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub Snowflake);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(IdPath(parse_id(&raw, "id")?))
    }
}

/// `/streamers/:streamer_id/levels/:level_id`
#[derive(Debug, Clone, Copy)]
pub struct LevelPath {
    pub streamer_id: Snowflake,
    pub level_id: Snowflake,
}

#[async_trait]
impl<S> FromRequestParts<S> for LevelPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((streamer_id, level_id)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(LevelPath {
            streamer_id: parse_id(&streamer_id, "streamer_id")?,
            level_id: parse_id(&level_id, "level_id")?,
        })
    }
}
