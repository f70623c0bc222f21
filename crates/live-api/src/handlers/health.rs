//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use live_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// GET /health/ready
///
/// Ready once the ledger backend answers.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    match state.service_context().ledger().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                status: "ready",
                ledger: "up",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Ledger readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    status: "unavailable",
                    ledger: "down",
                }),
            )
        }
    }
}
