//! Live status handlers

use axum::{extract::State, Json};
use live_service::dto::{
    LiveStreamerResponse, StartStreamRequest, StreamStartedResponse, StreamStoppedResponse,
};
use live_service::StreamService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /streaming/start
pub async fn start_stream(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedJson(request): ValidatedJson<StartStreamRequest>,
) -> ApiResult<Json<StreamStartedResponse>> {
    let started = StreamService::new(state.service_context())
        .start(&caller, request.channel_name)
        .await?;
    Ok(Json(started))
}

/// POST /streaming/stop
pub async fn stop_stream(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> ApiResult<Json<StreamStoppedResponse>> {
    let stopped = StreamService::new(state.service_context())
        .stop(&caller)
        .await?;
    Ok(Json(stopped))
}

/// GET /streaming/live
pub async fn live_streamers(State(state): State<AppState>) -> ApiResult<Json<Vec<LiveStreamerResponse>>> {
    let live = StreamService::new(state.service_context())
        .live_streamers()
        .await?;
    Ok(Json(live))
}
