//! Database models - SQLx-compatible structs for PostgreSQL tables

mod account;
mod gift;
mod level_tier;
mod progress;
mod transaction;

pub use account::AccountModel;
pub use gift::GiftModel;
pub use level_tier::LevelTierModel;
pub use progress::ProgressModel;
pub use transaction::GiftReceiptModel;
