//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL or in-process memory).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Account, Gift, GiftReceipt, LevelTier, NewAccount, Purchase, SpectatorProgress, Transaction,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Ledger Store
// ============================================================================

/// Durable balances and the append-only transaction log
///
/// Every mutation is a single atomic statement; callers compose them and compensate
/// on partial failure.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Find account by ID
    async fn get_account(&self, id: Snowflake) -> RepoResult<Option<Account>>;

    /// Return the account, inserting it with default balances first if absent
    async fn create_account_if_missing(&self, account: &NewAccount) -> RepoResult<Account>;

    /// Add `delta` coins. A negative delta is applied only if the balance stays
    /// non-negative, and no delta is applied if the balance would overflow; returns
    /// `false` when nothing was changed.
    async fn increment_coins(&self, id: Snowflake, delta: i64) -> RepoResult<bool>;

    /// Add `delta` points and return the new cumulative total
    async fn increment_points(&self, id: Snowflake, delta: i64) -> RepoResult<i64>;

    /// Store `max(current, level)` and return the stored level
    async fn set_level(&self, id: Snowflake, level: i32) -> RepoResult<i32>;

    /// Add streamed hours and the levels they earn in one atomic step
    ///
    /// The gain follows [`crate::leveling::level_for_hours`] against the stored level.
    /// Returns `(previous_total, new_total, level)`.
    async fn add_stream_hours(&self, id: Snowflake, hours: f64) -> RepoResult<(f64, f64, i32)>;

    /// Overwrite the live flag, channel name and start timestamp of a streamer
    async fn set_live_status(
        &self,
        streamer_id: Snowflake,
        is_live: bool,
        channel_name: Option<&str>,
        started_at: Option<DateTime<Utc>>,
    ) -> RepoResult<()>;

    /// Streamers currently broadcasting
    async fn live_streamers(&self) -> RepoResult<Vec<Account>>;

    /// Find the progress row for a (spectator, streamer) pair
    async fn find_progress(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
    ) -> RepoResult<Option<SpectatorProgress>>;

    /// Find the progress row, creating it at (0 points, level 1) if absent
    async fn get_or_create_progress(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
    ) -> RepoResult<SpectatorProgress>;

    /// Add points to an existing progress row and return it
    async fn add_progress_points(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
        delta: i64,
    ) -> RepoResult<SpectatorProgress>;

    /// Store `max(current, level)` on a progress row and return the stored level
    async fn set_progress_level(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
        level: i32,
    ) -> RepoResult<i32>;

    /// Append a ledger record
    async fn append_transaction(&self, tx: &Transaction) -> RepoResult<()>;

    /// Append a purchase record
    async fn append_purchase(&self, purchase: &Purchase) -> RepoResult<()>;

    /// Most recent gifts received by an account, newest first
    async fn gifts_received(&self, receiver_id: Snowflake, limit: i64) -> RepoResult<Vec<GiftReceipt>>;

    /// Level tier table of a streamer (any order)
    async fn get_level_tiers(&self, streamer_id: Snowflake) -> RepoResult<Vec<LevelTier>>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Gift Catalog
// ============================================================================

#[async_trait]
pub trait GiftCatalog: Send + Sync {
    /// Find gift by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Gift>>;

    /// Gifts of one streamer ordered by cost ascending
    async fn find_by_streamer(&self, streamer_id: Snowflake) -> RepoResult<Vec<Gift>>;

    /// Every gift ordered by cost ascending
    async fn list_all(&self) -> RepoResult<Vec<Gift>>;

    /// Create a gift; fails with `GiftNameExists` on a duplicate name
    async fn create(&self, gift: &Gift) -> RepoResult<()>;

    /// Delete a gift owned by `streamer_id`; `GiftNotFound` otherwise
    async fn delete(&self, id: Snowflake, streamer_id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Level Tier Repository
// ============================================================================

#[async_trait]
pub trait LevelTierRepository: Send + Sync {
    /// Find tier by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<LevelTier>>;

    /// Tiers of a streamer ordered by level number ascending
    async fn find_by_streamer(&self, streamer_id: Snowflake) -> RepoResult<Vec<LevelTier>>;

    /// Create a tier; fails with `LevelTierExists` when the level number is taken
    async fn create(&self, tier: &LevelTier) -> RepoResult<()>;

    /// Update name and required points of a tier
    async fn update(&self, tier: &LevelTier) -> RepoResult<()>;

    /// Delete a tier
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}
