//! Ports implemented by the infrastructure layer

mod publisher;
mod repositories;

pub use publisher::EventPublisher;
pub use repositories::{GiftCatalog, LedgerStore, LevelTierRepository, RepoResult};
