//! Level tier handlers

use axum::{extract::State, Json};
use live_core::LevelTier;
use live_service::dto::{CreateLevelRequest, UpdateLevelRequest};
use live_service::LevelTierService;

use crate::extractors::{AuthUser, IdPath, LevelPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /streamers/{streamer_id}/levels
pub async fn list_levels(
    State(state): State<AppState>,
    IdPath(streamer_id): IdPath,
) -> ApiResult<Json<Vec<LevelTier>>> {
    let tiers = LevelTierService::new(state.service_context())
        .list(streamer_id)
        .await?;
    Ok(Json(tiers))
}

/// POST /streamers/{streamer_id}/levels
pub async fn create_level(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    IdPath(streamer_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateLevelRequest>,
) -> ApiResult<Created<Json<LevelTier>>> {
    let tier = LevelTierService::new(state.service_context())
        .create(&caller, streamer_id, request)
        .await?;
    Ok(Created(Json(tier)))
}

/// PUT /streamers/{streamer_id}/levels/{level_id}
pub async fn update_level(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    path: LevelPath,
    ValidatedJson(request): ValidatedJson<UpdateLevelRequest>,
) -> ApiResult<Json<LevelTier>> {
    let tier = LevelTierService::new(state.service_context())
        .update(&caller, path.streamer_id, path.level_id, request)
        .await?;
    Ok(Json(tier))
}

/// DELETE /streamers/{streamer_id}/levels/{level_id}
pub async fn delete_level(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    path: LevelPath,
) -> ApiResult<NoContent> {
    LevelTierService::new(state.service_context())
        .delete(&caller, path.streamer_id, path.level_id)
        .await?;
    Ok(NoContent)
}
