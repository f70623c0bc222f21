//! Repository implementations
//!
//! PostgreSQL implementations of the store traits defined in live-core.

mod error;
mod gift;
mod ledger;
mod level_tier;

pub use gift::PgGiftCatalog;
pub use ledger::PgLedgerStore;
pub use level_tier::PgLevelTierRepository;
