//! Server setup
//!
//! One listener serves the WebSocket gateway at `/ws` next to the HTTP API. The
//! service layer publishes through the gateway's broadcaster, so gifts sent over HTTP
//! land in the receiver's room directly.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use axum::{routing::get, Router};
use live_api::{create_app, create_service_context, AppState};
use live_common::{AppConfig, AppError};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Gateway routes only
pub fn create_router() -> Router<GatewayState> {
    Router::new().route("/ws", get(gateway_handler))
}

/// Build the full router and the gateway state behind it
pub async fn create_server(config: AppConfig) -> Result<(Router, GatewayState), AppError> {
    let config = Arc::new(config);
    let state = GatewayState::new(config.clone());

    let service_context = create_service_context(&config, state.shared_broadcaster()).await?;
    let api = create_app(AppState::new(Arc::new(service_context), config));

    let router = create_router().with_state(state.clone()).merge(api);
    Ok((router, state))
}

/// Serve until ctrl-c, then drop all presence
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();
    let (app, state) = create_server(config).await?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Listening on http://{addr} (gateway at ws://{addr}/ws)");

    let reaper = handler::spawn_idle_reaper(state.clone());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    if let Some(reaper) = reaper {
        reaper.abort();
    }
    state.presence().clear();
    tracing::info!(
        connections = state.connection_manager().connection_count(),
        "Server stopped, presence cleared"
    );

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
