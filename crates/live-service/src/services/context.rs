//! Service context - dependency container for services
//!
//! Holds the stores, the room event publisher and the shared generators.

use std::sync::Arc;

use live_common::auth::JwtService;
use live_core::traits::{EventPublisher, GiftCatalog, LedgerStore, LevelTierRepository};
use live_core::{Snowflake, SnowflakeGenerator};
use live_db::{PgGiftCatalog, PgLedgerStore, PgLevelTierRepository, PgPool};

use crate::memory::MemoryLedger;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct ServiceContext {
    ledger: Arc<dyn LedgerStore>,
    gift_catalog: Arc<dyn GiftCatalog>,
    level_tiers: Arc<dyn LevelTierRepository>,
    publisher: Arc<dyn EventPublisher>,
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    pub fn new(
        ledger: Arc<dyn LedgerStore>,
        gift_catalog: Arc<dyn GiftCatalog>,
        level_tiers: Arc<dyn LevelTierRepository>,
        publisher: Arc<dyn EventPublisher>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            ledger,
            gift_catalog,
            level_tiers,
            publisher,
            jwt_service,
            snowflake_generator,
        }
    }

    // === Stores ===

    /// Get the ledger store
    pub fn ledger(&self) -> &dyn LedgerStore {
        self.ledger.as_ref()
    }

    /// Get the gift catalog
    pub fn gift_catalog(&self) -> &dyn GiftCatalog {
        self.gift_catalog.as_ref()
    }

    /// Get the level tier repository
    pub fn level_tiers(&self) -> &dyn LevelTierRepository {
        self.level_tiers.as_ref()
    }

    // === Events ===

    /// Get the room event publisher
    pub fn publisher(&self) -> &dyn EventPublisher {
        self.publisher.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("stores", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    ledger: Option<Arc<dyn LedgerStore>>,
    gift_catalog: Option<Arc<dyn GiftCatalog>>,
    level_tiers: Option<Arc<dyn LevelTierRepository>>,
    publisher: Option<Arc<dyn EventPublisher>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use PostgreSQL for every store
    pub fn postgres(self, pool: PgPool) -> Self {
        self.ledger(Arc::new(PgLedgerStore::new(pool.clone())))
            .gift_catalog(Arc::new(PgGiftCatalog::new(pool.clone())))
            .level_tiers(Arc::new(PgLevelTierRepository::new(pool)))
    }

    /// Use one process-local ledger for every store
    pub fn memory(self, ledger: Arc<MemoryLedger>) -> Self {
        self.ledger(ledger.clone())
            .gift_catalog(ledger.clone())
            .level_tiers(ledger)
    }

    pub fn ledger(mut self, ledger: Arc<dyn LedgerStore>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn gift_catalog(mut self, catalog: Arc<dyn GiftCatalog>) -> Self {
        self.gift_catalog = Some(catalog);
        self
    }

    pub fn level_tiers(mut self, repo: Arc<dyn LevelTierRepository>) -> Self {
        self.level_tiers = Some(repo);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.ledger.ok_or_else(|| ServiceError::validation("ledger is required"))?,
            self.gift_catalog
                .ok_or_else(|| ServiceError::validation("gift_catalog is required"))?,
            self.level_tiers
                .ok_or_else(|| ServiceError::validation("level_tiers is required"))?,
            self.publisher.ok_or_else(|| ServiceError::validation("publisher is required"))?,
            self.jwt_service.ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator.unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::RecordingPublisher;

    #[test]
    fn test_build_requires_stores() {
        let err = ServiceContextBuilder::new()
            .publisher(Arc::new(RecordingPublisher::new()))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("ledger is required"));
    }

    #[test]
    fn test_memory_context_builds() {
        let ctx = ServiceContextBuilder::new()
            .memory(Arc::new(MemoryLedger::new()))
            .publisher(Arc::new(RecordingPublisher::new()))
            .jwt_service(Arc::new(JwtService::new("secret", 60)))
            .build()
            .unwrap();
        assert_ne!(ctx.generate_id(), ctx.generate_id());
    }
}
