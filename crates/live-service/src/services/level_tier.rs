//! Level tier service
//!
//! A streamer's custom level table. Only the owning streamer may change it.

use live_core::entities::LevelTier;
use live_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreateLevelRequest, UpdateLevelRequest};

use super::account::{AccountService, Caller};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Level tier service
pub struct LevelTierService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LevelTierService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Tiers ordered by level number
    #[instrument(skip(self))]
    pub async fn list(&self, streamer_id: Snowflake) -> ServiceResult<Vec<LevelTier>> {
        Ok(self.ctx.level_tiers().find_by_streamer(streamer_id).await?)
    }

    #[instrument(skip(self, request), fields(caller_id = %caller.id))]
    pub async fn create(
        &self,
        caller: &Caller,
        streamer_id: Snowflake,
        request: CreateLevelRequest,
    ) -> ServiceResult<LevelTier> {
        caller.require_owner(streamer_id)?;
        caller.require_streamer()?;
        AccountService::new(self.ctx).ensure(caller).await?;

        let tier = LevelTier::new(
            self.ctx.generate_id(),
            streamer_id,
            request.level_number,
            request.level_name,
            request.required_points,
        );
        self.ctx.level_tiers().create(&tier).await?;

        info!(
            tier_id = %tier.id,
            level_number = tier.level_number,
            required_points = tier.required_points,
            "Level tier created"
        );

        Ok(tier)
    }

    #[instrument(skip(self, request), fields(caller_id = %caller.id))]
    pub async fn update(
        &self,
        caller: &Caller,
        streamer_id: Snowflake,
        tier_id: Snowflake,
        request: UpdateLevelRequest,
    ) -> ServiceResult<LevelTier> {
        caller.require_owner(streamer_id)?;

        let mut tier = self.owned_tier(streamer_id, tier_id).await?;
        tier.level_name = request.level_name;
        tier.required_points = request.required_points;
        self.ctx.level_tiers().update(&tier).await?;

        info!(tier_id = %tier.id, required_points = tier.required_points, "Level tier updated");

        Ok(tier)
    }

    #[instrument(skip(self), fields(caller_id = %caller.id))]
    pub async fn delete(&self, caller: &Caller, streamer_id: Snowflake, tier_id: Snowflake) -> ServiceResult<()> {
        caller.require_owner(streamer_id)?;

        self.owned_tier(streamer_id, tier_id).await?;
        self.ctx.level_tiers().delete(tier_id).await?;

        info!(tier_id = %tier_id, "Level tier deleted");

        Ok(())
    }

    async fn owned_tier(&self, streamer_id: Snowflake, tier_id: Snowflake) -> ServiceResult<LevelTier> {
        self.ctx
            .level_tiers()
            .find_by_id(tier_id)
            .await?
            .filter(|tier| tier.streamer_id == streamer_id)
            .ok_or_else(|| DomainError::LevelTierNotFound(tier_id).into())
    }
}
