//! Route definitions
//!
//! Every endpoint lives under `/api`; health probes sit at the root so they can skip
//! rate limiting.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{coins, gifts, health, levels, spectators, streamers, streaming};
use crate::state::AppState;

/// API routes, without health checks
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Liveness and readiness probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(gift_routes())
        .merge(coin_routes())
        .merge(spectator_routes())
        .merge(streamer_routes())
        .merge(streaming_routes())
}

fn gift_routes() -> Router<AppState> {
    Router::new()
        .route("/gifts", get(gifts::list_gifts).post(gifts::create_gift))
        .route("/gifts/send", post(gifts::send_gift))
        .route("/gifts/history/:user_id", get(gifts::gift_history))
        // GET takes a streamer id, DELETE a gift id
        .route("/gifts/:id", get(gifts::streamer_gifts).delete(gifts::delete_gift))
}

fn coin_routes() -> Router<AppState> {
    Router::new()
        .route("/coins/purchase", post(coins::purchase_coins))
        .route("/coins/balance/:id", get(coins::get_balance))
}

fn spectator_routes() -> Router<AppState> {
    Router::new()
        .route("/spectators/me", get(spectators::get_me))
        .route("/spectators/me/points", put(spectators::award_points))
        .route("/spectators/me/progress/:streamer_id", get(spectators::get_progress))
}

fn streamer_routes() -> Router<AppState> {
    Router::new()
        .route("/streamers/:streamer_id/points", put(streamers::add_points))
        .route("/streamers/:streamer_id/hours", put(streamers::add_hours))
        .route(
            "/streamers/:streamer_id/levels",
            get(levels::list_levels).post(levels::create_level),
        )
        .route(
            "/streamers/:streamer_id/levels/:level_id",
            put(levels::update_level).delete(levels::delete_level),
        )
}

fn streaming_routes() -> Router<AppState> {
    Router::new()
        .route("/streaming/start", post(streaming::start_stream))
        .route("/streaming/stop", post(streaming::stop_stream))
        .route("/streaming/live", get(streaming::live_streamers))
}
