//! # live-db
//!
//! PostgreSQL implementations of the store traits defined in `live-core`:
//!
//! - connection pool management and schema migrations
//! - SQLx `FromRow` models and model → entity mappers
//! - the ledger store, gift catalog and level tier repository
//!
//! Every balance change is a single statement. Debits are conditional
//! (`coins + delta >= 0` in the `WHERE` clause), so concurrent spends of the same
//! coins resolve inside the database.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use live_db::{create_pool, PgLedgerStore};
//! use live_core::traits::LedgerStore;
//!
//! async fn example(config: &live_common::DatabaseConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(config).await?;
//!     let ledger = PgLedgerStore::new(pool);
//!     let account = ledger.get_account(live_core::Snowflake::new(1)).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{PgGiftCatalog, PgLedgerStore, PgLevelTierRepository};
