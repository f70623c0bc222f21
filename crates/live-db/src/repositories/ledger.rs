//! PostgreSQL implementation of LedgerStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use live_core::entities::{
    Account, GiftReceipt, LevelTier, NewAccount, Purchase, SpectatorProgress, Transaction,
};
use live_core::error::DomainError;
use live_core::leveling::level_for_hours;
use live_core::traits::{LedgerStore, RepoResult};
use live_core::value_objects::Snowflake;

use crate::models::{AccountModel, GiftReceiptModel, LevelTierModel, ProgressModel};

use super::error::{is_numeric_overflow, map_db_error};

/// PostgreSQL implementation of LedgerStore
#[derive(Clone)]
pub struct PgLedgerStore {
    pool: PgPool,
}

impl PgLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    #[instrument(skip(self))]
    async fn get_account(&self, id: Snowflake) -> RepoResult<Option<Account>> {
        let result = sqlx::query_as::<_, AccountModel>(
            r#"
            SELECT id, role, display_name, coins, points, level, is_live, live_channel_name,
                   live_started_at, hours_streamed, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Account::from))
    }

    #[instrument(skip(self))]
    async fn create_account_if_missing(&self, account: &NewAccount) -> RepoResult<Account> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, role, display_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(account.id.into_inner())
        .bind(account.role.as_str())
        .bind(&account.display_name)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.get_account(account.id)
            .await?
            .ok_or(DomainError::AccountNotFound(account.id))
    }

    #[instrument(skip(self))]
    async fn increment_coins(&self, id: Snowflake, delta: i64) -> RepoResult<bool> {
        // the guard turns a debit into a compare-and-set on the balance
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET coins = coins + $2, updated_at = NOW()
            WHERE id = $1 AND coins + $2 >= 0
            "#,
        )
        .bind(id.into_inner())
        .bind(delta)
        .execute(&self.pool)
        .await;

        match result {
            Ok(result) => Ok(result.rows_affected() > 0),
            // a balance that would overflow is left unchanged, like an overdraft
            Err(e) if is_numeric_overflow(&e) => Ok(false),
            Err(e) => Err(map_db_error(e)),
        }
    }

    #[instrument(skip(self))]
    async fn increment_points(&self, id: Snowflake, delta: i64) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE accounts
            SET points = points + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING points
            "#,
        )
        .bind(id.into_inner())
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::AccountNotFound(id))
    }

    #[instrument(skip(self))]
    async fn set_level(&self, id: Snowflake, level: i32) -> RepoResult<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE accounts
            SET level = GREATEST(level, $2), updated_at = NOW()
            WHERE id = $1
            RETURNING level
            "#,
        )
        .bind(id.into_inner())
        .bind(level)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::AccountNotFound(id))
    }

    #[instrument(skip(self))]
    async fn add_stream_hours(&self, id: Snowflake, hours: f64) -> RepoResult<(f64, f64, i32)> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // the row lock keeps concurrent credits from reading the same previous total
        let (previous, level) = sqlx::query_as::<_, (f64, i32)>(
            r#"
            SELECT hours_streamed, level
            FROM accounts
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::AccountNotFound(id))?;

        let total = previous + hours;
        let level = level_for_hours(level, previous, total);

        sqlx::query(
            r#"
            UPDATE accounts
            SET hours_streamed = $2, level = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .bind(total)
        .bind(level)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok((previous, total, level))
    }

    #[instrument(skip(self))]
    async fn set_live_status(
        &self,
        streamer_id: Snowflake,
        is_live: bool,
        channel_name: Option<&str>,
        started_at: Option<DateTime<Utc>>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET is_live = $2, live_channel_name = $3, live_started_at = $4, updated_at = NOW()
            WHERE id = $1 AND role = 'streamer'
            "#,
        )
        .bind(streamer_id.into_inner())
        .bind(is_live)
        .bind(channel_name)
        .bind(started_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AccountNotFound(streamer_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn live_streamers(&self) -> RepoResult<Vec<Account>> {
        let results = sqlx::query_as::<_, AccountModel>(
            r#"
            SELECT id, role, display_name, coins, points, level, is_live, live_channel_name,
                   live_started_at, hours_streamed, created_at, updated_at
            FROM accounts
            WHERE is_live AND role = 'streamer'
            ORDER BY live_started_at DESC NULLS LAST
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Account::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_progress(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
    ) -> RepoResult<Option<SpectatorProgress>> {
        let result = sqlx::query_as::<_, ProgressModel>(
            r#"
            SELECT spectator_id, streamer_id, points, level, updated_at
            FROM spectator_progress
            WHERE spectator_id = $1 AND streamer_id = $2
            "#,
        )
        .bind(spectator_id.into_inner())
        .bind(streamer_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(SpectatorProgress::from))
    }

    #[instrument(skip(self))]
    async fn get_or_create_progress(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
    ) -> RepoResult<SpectatorProgress> {
        // no-op update on conflict so RETURNING yields the existing row too
        let model = sqlx::query_as::<_, ProgressModel>(
            r#"
            INSERT INTO spectator_progress (spectator_id, streamer_id)
            VALUES ($1, $2)
            ON CONFLICT (spectator_id, streamer_id)
            DO UPDATE SET spectator_id = EXCLUDED.spectator_id
            RETURNING spectator_id, streamer_id, points, level, updated_at
            "#,
        )
        .bind(spectator_id.into_inner())
        .bind(streamer_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(SpectatorProgress::from(model))
    }

    #[instrument(skip(self))]
    async fn add_progress_points(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
        delta: i64,
    ) -> RepoResult<SpectatorProgress> {
        let result = sqlx::query_as::<_, ProgressModel>(
            r#"
            UPDATE spectator_progress
            SET points = points + $3, updated_at = NOW()
            WHERE spectator_id = $1 AND streamer_id = $2
            RETURNING spectator_id, streamer_id, points, level, updated_at
            "#,
        )
        .bind(spectator_id.into_inner())
        .bind(streamer_id.into_inner())
        .bind(delta)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result
            .map(SpectatorProgress::from)
            .ok_or(DomainError::AccountNotFound(spectator_id))
    }

    #[instrument(skip(self))]
    async fn set_progress_level(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
        level: i32,
    ) -> RepoResult<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE spectator_progress
            SET level = GREATEST(level, $3), updated_at = NOW()
            WHERE spectator_id = $1 AND streamer_id = $2
            RETURNING level
            "#,
        )
        .bind(spectator_id.into_inner())
        .bind(streamer_id.into_inner())
        .bind(level)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::AccountNotFound(spectator_id))
    }

    #[instrument(skip(self, tx), fields(tx_id = %tx.id, kind = %tx.kind))]
    async fn append_transaction(&self, tx: &Transaction) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions
                (id, sender_id, receiver_id, gift_id, kind, amount, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(tx.id.into_inner())
        .bind(tx.sender_id.into_inner())
        .bind(tx.receiver_id.map(Snowflake::into_inner))
        .bind(tx.gift_id.map(Snowflake::into_inner))
        .bind(tx.kind.as_str())
        .bind(tx.amount)
        .bind(&tx.description)
        .bind(tx.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, purchase), fields(purchase_id = %purchase.id))]
    async fn append_purchase(&self, purchase: &Purchase) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO purchases (id, account_id, coin_amount, price, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(purchase.id.into_inner())
        .bind(purchase.account_id.into_inner())
        .bind(purchase.coin_amount)
        .bind(purchase.price)
        .bind(purchase.status.as_str())
        .bind(purchase.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn gifts_received(&self, receiver_id: Snowflake, limit: i64) -> RepoResult<Vec<GiftReceipt>> {
        let limit = limit.clamp(1, 100);

        let results = sqlx::query_as::<_, GiftReceiptModel>(
            r#"
            SELECT t.id, t.sender_id, s.display_name AS sender_name, t.gift_id,
                   g.name AS gift_name, g.emoji AS gift_emoji, g.points AS gift_points,
                   t.amount, t.description, t.created_at
            FROM transactions t
            JOIN accounts s ON s.id = t.sender_id
            LEFT JOIN gifts g ON g.id = t.gift_id
            WHERE t.receiver_id = $1 AND t.kind = 'gift_sent'
            ORDER BY t.created_at DESC, t.id DESC
            LIMIT $2
            "#,
        )
        .bind(receiver_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(GiftReceipt::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_level_tiers(&self, streamer_id: Snowflake) -> RepoResult<Vec<LevelTier>> {
        let results = sqlx::query_as::<_, LevelTierModel>(
            r#"
            SELECT id, streamer_id, level_number, level_name, required_points, created_at
            FROM level_tiers
            WHERE streamer_id = $1
            ORDER BY required_points DESC
            "#,
        )
        .bind(streamer_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LevelTier::from).collect())
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgLedgerStore>();
    }
}
