//! Streamer balance handlers; the path id must be the caller's own

use axum::{extract::State, Json};
use live_service::dto::{
    AddStreamHoursRequest, AddStreamerPointsRequest, ProgressResponse, StreamHoursResponse,
};
use live_service::ProgressService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// PUT /streamers/{streamer_id}/points
pub async fn add_points(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    IdPath(streamer_id): IdPath,
    ValidatedJson(request): ValidatedJson<AddStreamerPointsRequest>,
) -> ApiResult<Json<ProgressResponse>> {
    let updated = ProgressService::new(state.service_context())
        .add_streamer_points(&caller, streamer_id, request.points_to_add)
        .await?;
    Ok(Json(updated))
}

/// PUT /streamers/{streamer_id}/hours
pub async fn add_hours(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    IdPath(streamer_id): IdPath,
    ValidatedJson(request): ValidatedJson<AddStreamHoursRequest>,
) -> ApiResult<Json<StreamHoursResponse>> {
    let updated = ProgressService::new(state.service_context())
        .add_stream_hours(&caller, streamer_id, request.hours_to_add)
        .await?;
    Ok(Json(updated))
}
