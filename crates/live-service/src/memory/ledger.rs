//! Process-local ledger
//!
//! Implements the ledger, gift catalog and level tier stores over one lock so every
//! operation is atomic with respect to the others, the same guarantee the single-statement
//! PostgreSQL queries give. State is lost on restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use live_core::entities::{
    Account, AccountRole, Gift, GiftReceipt, LevelTier, NewAccount, Purchase, SpectatorProgress,
    Transaction, TransactionKind,
};
use live_core::error::DomainError;
use live_core::leveling::level_for_hours;
use live_core::traits::{GiftCatalog, LedgerStore, LevelTierRepository, RepoResult};
use live_core::value_objects::Snowflake;

#[derive(Default)]
struct State {
    accounts: HashMap<Snowflake, Account>,
    progress: HashMap<(Snowflake, Snowflake), SpectatorProgress>,
    transactions: Vec<Transaction>,
    purchases: Vec<Purchase>,
    gifts: HashMap<Snowflake, Gift>,
    tiers: HashMap<Snowflake, LevelTier>,
}

/// In-memory store backing `LEDGER_BACKEND=memory`
#[derive(Default)]
pub struct MemoryLedger {
    state: RwLock<State>,
    fail_credits: AtomicBool,
    fail_appends: AtomicBool,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `increment_points` fail until reset
    pub fn set_fail_credits(&self, fail: bool) {
        self.fail_credits.store(fail, Ordering::SeqCst);
    }

    /// Make `append_transaction` fail until reset
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the transaction log, oldest first
    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.read().transactions.clone()
    }

    /// Snapshot of recorded purchases, oldest first
    pub fn purchases(&self) -> Vec<Purchase> {
        self.state.read().purchases.clone()
    }
}

fn injected_failure(what: &str) -> DomainError {
    DomainError::DatabaseError(format!("injected {what} failure"))
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn get_account(&self, id: Snowflake) -> RepoResult<Option<Account>> {
        Ok(self.state.read().accounts.get(&id).cloned())
    }

    async fn create_account_if_missing(&self, account: &NewAccount) -> RepoResult<Account> {
        let mut state = self.state.write();
        let stored = state
            .accounts
            .entry(account.id)
            .or_insert_with(|| account.clone().into_account());
        Ok(stored.clone())
    }

    async fn increment_coins(&self, id: Snowflake, delta: i64) -> RepoResult<bool> {
        let mut state = self.state.write();
        let Some(account) = state.accounts.get_mut(&id) else {
            return Ok(false);
        };
        match account.coins.checked_add(delta) {
            Some(next) if next >= 0 => {
                account.coins = next;
                account.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn increment_points(&self, id: Snowflake, delta: i64) -> RepoResult<i64> {
        if self.fail_credits.load(Ordering::SeqCst) {
            return Err(injected_failure("credit"));
        }
        let mut state = self.state.write();
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or(DomainError::AccountNotFound(id))?;
        account.points = account.points.saturating_add(delta);
        account.updated_at = Utc::now();
        Ok(account.points)
    }

    async fn set_level(&self, id: Snowflake, level: i32) -> RepoResult<i32> {
        let mut state = self.state.write();
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or(DomainError::AccountNotFound(id))?;
        account.level = account.level.max(level);
        Ok(account.level)
    }

    async fn add_stream_hours(&self, id: Snowflake, hours: f64) -> RepoResult<(f64, f64, i32)> {
        let mut state = self.state.write();
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or(DomainError::AccountNotFound(id))?;
        let previous = account.live.hours_streamed;
        account.live.hours_streamed += hours;
        account.level = level_for_hours(account.level, previous, account.live.hours_streamed);
        account.updated_at = Utc::now();
        Ok((previous, account.live.hours_streamed, account.level))
    }

    async fn set_live_status(
        &self,
        streamer_id: Snowflake,
        is_live: bool,
        channel_name: Option<&str>,
        started_at: Option<DateTime<Utc>>,
    ) -> RepoResult<()> {
        let mut state = self.state.write();
        let account = state
            .accounts
            .get_mut(&streamer_id)
            .filter(|a| a.role == AccountRole::Streamer)
            .ok_or(DomainError::AccountNotFound(streamer_id))?;
        account.live.is_live = is_live;
        account.live.channel_name = channel_name.map(str::to_owned);
        account.live.started_at = started_at;
        account.updated_at = Utc::now();
        Ok(())
    }

    async fn live_streamers(&self) -> RepoResult<Vec<Account>> {
        let state = self.state.read();
        let mut live: Vec<Account> = state
            .accounts
            .values()
            .filter(|a| a.is_streamer() && a.live.is_live)
            .cloned()
            .collect();
        live.sort_by(|a, b| b.live.started_at.cmp(&a.live.started_at));
        Ok(live)
    }

    async fn find_progress(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
    ) -> RepoResult<Option<SpectatorProgress>> {
        Ok(self
            .state
            .read()
            .progress
            .get(&(spectator_id, streamer_id))
            .cloned())
    }

    async fn get_or_create_progress(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
    ) -> RepoResult<SpectatorProgress> {
        let mut state = self.state.write();
        let row = state
            .progress
            .entry((spectator_id, streamer_id))
            .or_insert_with(|| SpectatorProgress::new(spectator_id, streamer_id));
        Ok(row.clone())
    }

    async fn add_progress_points(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
        delta: i64,
    ) -> RepoResult<SpectatorProgress> {
        let mut state = self.state.write();
        let row = state
            .progress
            .get_mut(&(spectator_id, streamer_id))
            .ok_or(DomainError::AccountNotFound(spectator_id))?;
        row.points = row.points.saturating_add(delta);
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn set_progress_level(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
        level: i32,
    ) -> RepoResult<i32> {
        let mut state = self.state.write();
        let row = state
            .progress
            .get_mut(&(spectator_id, streamer_id))
            .ok_or(DomainError::AccountNotFound(spectator_id))?;
        row.level = row.level.max(level);
        Ok(row.level)
    }

    async fn append_transaction(&self, tx: &Transaction) -> RepoResult<()> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(injected_failure("append"));
        }
        self.state.write().transactions.push(tx.clone());
        Ok(())
    }

    async fn append_purchase(&self, purchase: &Purchase) -> RepoResult<()> {
        self.state.write().purchases.push(purchase.clone());
        Ok(())
    }

    async fn gifts_received(&self, receiver_id: Snowflake, limit: i64) -> RepoResult<Vec<GiftReceipt>> {
        let limit = usize::try_from(limit.clamp(1, 100)).unwrap_or(50);
        let state = self.state.read();

        let receipts = state
            .transactions
            .iter()
            .rev()
            .filter(|tx| tx.kind == TransactionKind::GiftSent && tx.receiver_id == Some(receiver_id))
            .filter_map(|tx| {
                let sender = state.accounts.get(&tx.sender_id)?;
                let gift = tx.gift_id.and_then(|id| state.gifts.get(&id));
                Some(GiftReceipt {
                    transaction_id: tx.id,
                    sender_id: tx.sender_id,
                    sender_name: sender.display_name.clone(),
                    gift_id: tx.gift_id.filter(|_| gift.is_some()),
                    gift_name: gift.map(|g| g.name.clone()),
                    gift_emoji: gift.map(|g| g.emoji.clone()),
                    gift_points: gift.map(|g| g.points),
                    amount: tx.amount,
                    description: tx.description.clone(),
                    created_at: tx.created_at,
                })
            })
            .take(limit)
            .collect();

        Ok(receipts)
    }

    async fn get_level_tiers(&self, streamer_id: Snowflake) -> RepoResult<Vec<LevelTier>> {
        Ok(self
            .state
            .read()
            .tiers
            .values()
            .filter(|t| t.streamer_id == streamer_id)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[async_trait]
impl GiftCatalog for MemoryLedger {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Gift>> {
        Ok(self.state.read().gifts.get(&id).cloned())
    }

    async fn find_by_streamer(&self, streamer_id: Snowflake) -> RepoResult<Vec<Gift>> {
        let mut gifts: Vec<Gift> = self
            .state
            .read()
            .gifts
            .values()
            .filter(|g| g.streamer_id == streamer_id)
            .cloned()
            .collect();
        gifts.sort_by_key(|g| (g.cost, g.id));
        Ok(gifts)
    }

    async fn list_all(&self) -> RepoResult<Vec<Gift>> {
        let mut gifts: Vec<Gift> = self.state.read().gifts.values().cloned().collect();
        gifts.sort_by_key(|g| (g.cost, g.id));
        Ok(gifts)
    }

    async fn create(&self, gift: &Gift) -> RepoResult<()> {
        let mut state = self.state.write();
        if state.gifts.values().any(|g| g.name == gift.name) {
            return Err(DomainError::GiftNameExists(gift.name.clone()));
        }
        state.gifts.insert(gift.id, gift.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake, streamer_id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.write();
        match state.gifts.get(&id) {
            Some(gift) if gift.is_owned_by(streamer_id) => {
                state.gifts.remove(&id);
                Ok(())
            }
            _ => Err(DomainError::GiftNotFound(id)),
        }
    }
}

#[async_trait]
impl LevelTierRepository for MemoryLedger {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<LevelTier>> {
        Ok(self.state.read().tiers.get(&id).cloned())
    }

    async fn find_by_streamer(&self, streamer_id: Snowflake) -> RepoResult<Vec<LevelTier>> {
        let mut tiers = self.get_level_tiers(streamer_id).await?;
        tiers.sort_by_key(|t| t.level_number);
        Ok(tiers)
    }

    async fn create(&self, tier: &LevelTier) -> RepoResult<()> {
        let mut state = self.state.write();
        let taken = state
            .tiers
            .values()
            .any(|t| t.streamer_id == tier.streamer_id && t.level_number == tier.level_number);
        if taken {
            return Err(DomainError::LevelTierExists(tier.level_number));
        }
        state.tiers.insert(tier.id, tier.clone());
        Ok(())
    }

    async fn update(&self, tier: &LevelTier) -> RepoResult<()> {
        let mut state = self.state.write();
        let stored = state
            .tiers
            .get_mut(&tier.id)
            .ok_or(DomainError::LevelTierNotFound(tier.id))?;
        stored.level_name = tier.level_name.clone();
        stored.required_points = tier.required_points;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.state
            .write()
            .tiers
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::LevelTierNotFound(id))
    }
}
