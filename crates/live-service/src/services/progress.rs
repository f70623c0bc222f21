//! Progress service
//!
//! Points and levels: per-channel spectator progress and streamer totals.
//! Every level write goes through `max(current, computed)`.

use live_core::entities::AccountRole;
use live_core::leveling::{default_level, level_for_points};
use live_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{ProgressResponse, StreamHoursResponse};

use super::account::{AccountService, Caller};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Progress service
pub struct ProgressService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProgressService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Award points to the caller in one streamer's channel
    ///
    /// The level comes from the streamer's tier table, or one level per 50 points when
    /// the streamer has none.
    #[instrument(skip(self), fields(spectator_id = %caller.id))]
    pub async fn award_spectator_points(
        &self,
        caller: &Caller,
        streamer_id: Snowflake,
        points_to_add: i64,
    ) -> ServiceResult<ProgressResponse> {
        if points_to_add < 0 {
            return Err(DomainError::InvalidAmount(points_to_add).into());
        }

        let accounts = AccountService::new(self.ctx);
        accounts.ensure(caller).await?;
        accounts.get_streamer(streamer_id).await?;

        let ledger = self.ctx.ledger();
        ledger.get_or_create_progress(caller.id, streamer_id).await?;
        let row = ledger
            .add_progress_points(caller.id, streamer_id, points_to_add)
            .await?;

        let tiers = ledger.get_level_tiers(streamer_id).await?;
        let computed = level_for_points(row.points, AccountRole::Spectator, &tiers);
        let level = ledger
            .set_progress_level(caller.id, streamer_id, computed)
            .await?;

        info!(
            streamer_id = %streamer_id,
            points = row.points,
            level,
            tiered = !tiers.is_empty(),
            "Spectator progress updated"
        );

        Ok(ProgressResponse {
            points: row.points,
            level,
        })
    }

    /// The caller's progress in a channel; `{0, 1}` before the first award
    #[instrument(skip(self))]
    pub async fn spectator_progress(
        &self,
        spectator_id: Snowflake,
        streamer_id: Snowflake,
    ) -> ServiceResult<ProgressResponse> {
        Ok(self
            .ctx
            .ledger()
            .find_progress(spectator_id, streamer_id)
            .await?
            .map_or_else(ProgressResponse::initial, ProgressResponse::from))
    }

    /// Add points to the caller's own streamer account, one level per 100 points
    #[instrument(skip(self), fields(caller_id = %caller.id))]
    pub async fn add_streamer_points(
        &self,
        caller: &Caller,
        streamer_id: Snowflake,
        points_to_add: i64,
    ) -> ServiceResult<ProgressResponse> {
        caller.require_owner(streamer_id)?;
        if points_to_add < 0 {
            return Err(DomainError::InvalidAmount(points_to_add).into());
        }

        AccountService::new(self.ctx).get_streamer(streamer_id).await?;

        let ledger = self.ctx.ledger();
        let points = ledger.increment_points(streamer_id, points_to_add).await?;
        let level = ledger
            .set_level(streamer_id, default_level(points, AccountRole::Streamer))
            .await?;

        info!(streamer_id = %streamer_id, points, level, "Streamer points updated");

        Ok(ProgressResponse { points, level })
    }

    /// Add streamed hours to the caller's own streamer account
    #[instrument(skip(self), fields(caller_id = %caller.id))]
    pub async fn add_stream_hours(
        &self,
        caller: &Caller,
        streamer_id: Snowflake,
        hours_to_add: f64,
    ) -> ServiceResult<StreamHoursResponse> {
        caller.require_owner(streamer_id)?;
        if !hours_to_add.is_finite() || hours_to_add < 0.0 {
            return Err(DomainError::ValidationError("hours must be a non-negative number".into()).into());
        }

        let account = AccountService::new(self.ctx).get_streamer(streamer_id).await?;
        let (total_hours, level) = self.credit_hours(account.id, hours_to_add).await?;

        Ok(StreamHoursResponse {
            hours_streamed: total_hours,
            level,
            points: account.points,
        })
    }

    /// Add hours and apply incremental hours leveling; returns `(total_hours, level)`
    ///
    /// The level gain is applied by the store against the stored level, so concurrent
    /// credits each keep their levels.
    pub(crate) async fn credit_hours(&self, streamer_id: Snowflake, hours: f64) -> ServiceResult<(f64, i32)> {
        let (old_hours, new_hours, level) = self.ctx.ledger().add_stream_hours(streamer_id, hours).await?;

        info!(
            streamer_id = %streamer_id,
            old_hours,
            new_hours,
            level,
            "Stream hours credited"
        );

        Ok((new_hours, level))
    }
}
