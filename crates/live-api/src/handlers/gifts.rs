//! Gift handlers
//!
//! Catalog management, gift transfers and received-gift history.

use axum::{extract::State, Json};
use live_core::{Gift, GiftReceipt};
use live_service::dto::{CreateGiftRequest, GiftTransferResponse, SendGiftRequest};
use live_service::{EconomyService, GiftService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /gifts
pub async fn list_gifts(State(state): State<AppState>) -> ApiResult<Json<Vec<Gift>>> {
    let gifts = GiftService::new(state.service_context()).all_gifts().await?;
    Ok(Json(gifts))
}

/// GET /gifts/{streamer_id}
pub async fn streamer_gifts(
    State(state): State<AppState>,
    IdPath(streamer_id): IdPath,
) -> ApiResult<Json<Vec<Gift>>> {
    let gifts = GiftService::new(state.service_context())
        .streamer_gifts(streamer_id)
        .await?;
    Ok(Json(gifts))
}

/// POST /gifts
pub async fn create_gift(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedJson(request): ValidatedJson<CreateGiftRequest>,
) -> ApiResult<Created<Json<Gift>>> {
    let gift = GiftService::new(state.service_context())
        .create_gift(&caller, request)
        .await?;
    Ok(Created(Json(gift)))
}

/// DELETE /gifts/{gift_id}
pub async fn delete_gift(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    IdPath(gift_id): IdPath,
) -> ApiResult<NoContent> {
    GiftService::new(state.service_context())
        .delete_gift(&caller, gift_id)
        .await?;
    Ok(NoContent)
}

/// POST /gifts/send
///
/// The ledger commit is final once this returns; the room announcement that follows
/// cannot undo it.
pub async fn send_gift(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedJson(request): ValidatedJson<SendGiftRequest>,
) -> ApiResult<Json<GiftTransferResponse>> {
    let economy = EconomyService::new(state.service_context());
    let transfer = economy
        .send_gift(caller.id, request.receiver_id, request.gift_id, request.amount)
        .await?;

    economy.announce_gift(&transfer).await;

    Ok(Json(transfer.balances))
}

/// GET /gifts/history/{user_id}
pub async fn gift_history(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<Vec<GiftReceipt>>> {
    let history = EconomyService::new(state.service_context())
        .gift_history(user_id)
        .await?;
    Ok(Json(history))
}
