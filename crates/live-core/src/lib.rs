//! # live-core
//!
//! Domain layer for the live-streaming platform: accounts and their balances, the gift
//! catalog, ledger records, level rules, room events and the store traits the
//! infrastructure layer implements.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod leveling;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Account, AccountRole, Gift, GiftReceipt, LevelTier, LiveStatus, NewAccount, Purchase,
    PurchaseStatus, SpectatorProgress, Transaction, TransactionKind,
};
pub use error::DomainError;
pub use events::RoomEvent;
pub use leveling::{level_for_hours, level_for_points, raise_level};
pub use traits::{
    EventPublisher, GiftCatalog, LedgerStore, LevelTierRepository, RepoResult,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
