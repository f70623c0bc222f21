//! Domain entities - core business objects

mod account;
mod gift;
mod level_tier;
mod progress;
mod purchase;
mod transaction;

pub use account::{Account, AccountRole, LiveStatus, NewAccount};
pub use gift::Gift;
pub use level_tier::LevelTier;
pub use progress::SpectatorProgress;
pub use purchase::{Purchase, PurchaseStatus};
pub use transaction::{GiftReceipt, Transaction, TransactionKind};
