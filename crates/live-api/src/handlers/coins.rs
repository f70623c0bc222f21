//! Coin handlers

use axum::{extract::State, Json};
use live_service::dto::{BalanceResponse, PurchaseCoinsRequest, PurchaseResponse};
use live_service::{AccountService, EconomyService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /coins/purchase
pub async fn purchase_coins(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedJson(request): ValidatedJson<PurchaseCoinsRequest>,
) -> ApiResult<Json<PurchaseResponse>> {
    let response = EconomyService::new(state.service_context())
        .purchase_coins(&caller, request.coin_amount, request.price)
        .await?;
    Ok(Json(response))
}

/// GET /coins/balance/{id}
pub async fn get_balance(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(account_id): IdPath,
) -> ApiResult<Json<BalanceResponse>> {
    let balance = AccountService::new(state.service_context())
        .balance(account_id)
        .await?;
    Ok(Json(balance))
}
