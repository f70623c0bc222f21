//! Application assembly
//!
//! Builds the service context for the configured ledger backend and wraps the API
//! router in its middleware. The caller supplies the event publisher, which is the
//! realtime gateway when running the full server.

use std::sync::Arc;

use axum::Router;
use live_common::{AppConfig, AppError, JwtService, LedgerBackend};
use live_core::{EventPublisher, SnowflakeGenerator};
use live_db::{create_pool, run_migrations};
use live_service::{MemoryLedger, ServiceContext, ServiceContextBuilder};
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// API and health routes with their middleware, ready to merge into the server router
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_rate_limit(create_router(), &config.rate_limit);
    let router = apply_middleware(
        api.merge(health_routes()),
        &config.cors,
        config.app.env.is_production(),
    );
    router.with_state(state)
}

/// Connect the ledger backend and build the service context around `publisher`
pub async fn create_service_context(
    config: &AppConfig,
    publisher: Arc<dyn EventPublisher>,
) -> Result<ServiceContext, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let builder = ServiceContextBuilder::new()
        .publisher(publisher)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator);

    let builder = match config.ledger.backend {
        LedgerBackend::Memory => {
            warn!("Using the in-memory ledger; balances are lost on restart");
            builder.memory(Arc::new(MemoryLedger::new()))
        }
        LedgerBackend::Postgres => {
            let db_config = config
                .ledger
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required for the postgres ledger".into()))?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(db_config)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            if let Some(dir) = &db_config.migrations_dir {
                run_migrations(&pool, dir)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                info!(dir = %dir, "Migrations applied");
            }

            builder.postgres(pool)
        }
    };

    builder.build().map_err(|e| AppError::Config(e.to_string()))
}
