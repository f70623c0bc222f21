//! Gift catalog service

use live_core::entities::Gift;
use live_core::events::RoomEvent;
use live_core::Snowflake;
use tracing::{info, instrument, warn};

use crate::dto::CreateGiftRequest;

use super::account::{AccountService, Caller};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Gift catalog service
pub struct GiftService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GiftService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a gift to the caller's catalog and tell their room about it
    #[instrument(skip(self, request), fields(streamer_id = %caller.id, name = %request.name))]
    pub async fn create_gift(&self, caller: &Caller, request: CreateGiftRequest) -> ServiceResult<Gift> {
        caller.require_streamer()?;
        AccountService::new(self.ctx).ensure(caller).await?;

        let mut gift = Gift::new(
            self.ctx.generate_id(),
            caller.id,
            request.name.trim().to_string(),
            request.emoji,
            request.cost,
            request.points,
        );
        gift.description = request.description.unwrap_or_default();

        self.ctx.gift_catalog().create(&gift).await?;

        info!(gift_id = %gift.id, cost = gift.cost, points = gift.points, "Gift created");

        let payload = serde_json::to_value(&gift).map_err(|e| ServiceError::internal(e.to_string()))?;
        let event = RoomEvent::GiftListUpdated {
            streamer_id: caller.id,
            gift: payload,
        };
        if let Err(e) = self.ctx.publisher().publish(event).await {
            warn!(gift_id = %gift.id, error = %e, "Failed to announce new gift");
        }

        Ok(gift)
    }

    /// Remove one of the caller's gifts; someone else's gift reads as missing
    #[instrument(skip(self), fields(streamer_id = %caller.id))]
    pub async fn delete_gift(&self, caller: &Caller, gift_id: Snowflake) -> ServiceResult<()> {
        self.ctx.gift_catalog().delete(gift_id, caller.id).await?;
        info!(gift_id = %gift_id, "Gift deleted");
        Ok(())
    }

    /// Gifts of one streamer, cheapest first
    #[instrument(skip(self))]
    pub async fn streamer_gifts(&self, streamer_id: Snowflake) -> ServiceResult<Vec<Gift>> {
        Ok(self.ctx.gift_catalog().find_by_streamer(streamer_id).await?)
    }

    /// Whole catalog, cheapest first
    #[instrument(skip(self))]
    pub async fn all_gifts(&self) -> ServiceResult<Vec<Gift>> {
        Ok(self.ctx.gift_catalog().list_all().await?)
    }
}
