//! Spectator handlers
//!
//! Everything here acts on the caller's own account.

use axum::{extract::State, Json};
use live_service::dto::{AccountResponse, AddSpectatorPointsRequest, ProgressResponse};
use live_service::{AccountService, ProgressService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /spectators/me
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> ApiResult<Json<AccountResponse>> {
    let account = AccountService::new(state.service_context())
        .ensure(&caller)
        .await?;
    Ok(Json(account.into()))
}

/// PUT /spectators/me/points
pub async fn award_points(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedJson(request): ValidatedJson<AddSpectatorPointsRequest>,
) -> ApiResult<Json<ProgressResponse>> {
    let progress = ProgressService::new(state.service_context())
        .award_spectator_points(&caller, request.streamer_id, request.points_to_add)
        .await?;
    Ok(Json(progress))
}

/// GET /spectators/me/progress/{streamer_id}
pub async fn get_progress(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    IdPath(streamer_id): IdPath,
) -> ApiResult<Json<ProgressResponse>> {
    let progress = ProgressService::new(state.service_context())
        .spectator_progress(caller.id, streamer_id)
        .await?;
    Ok(Json(progress))
}
