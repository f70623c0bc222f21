//! Stream service
//!
//! Live/offline transitions of a streamer. Each transition is announced to every
//! connected client.

use chrono::Utc;
use live_core::events::RoomEvent;
use live_core::Snowflake;
use tracing::{info, instrument, warn};

use crate::dto::{LiveStreamerResponse, StreamStartedResponse, StreamStoppedResponse};

use super::account::{AccountService, Caller};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::progress::ProgressService;

/// Stream service
pub struct StreamService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StreamService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mark the caller live on `channel_name`
    #[instrument(skip(self), fields(streamer_id = %caller.id))]
    pub async fn start(&self, caller: &Caller, channel_name: String) -> ServiceResult<StreamStartedResponse> {
        caller.require_streamer()?;
        AccountService::new(self.ctx).ensure(caller).await?;

        let started_at = Utc::now();
        self.ctx
            .ledger()
            .set_live_status(caller.id, true, Some(&channel_name), Some(started_at))
            .await?;

        info!(channel_name = %channel_name, "Stream started");

        self.announce(caller.id, true, Some(channel_name.clone())).await;

        Ok(StreamStartedResponse {
            channel_name,
            started_at,
        })
    }

    /// Take the caller offline and credit the hours since the stream started
    #[instrument(skip(self), fields(streamer_id = %caller.id))]
    pub async fn stop(&self, caller: &Caller) -> ServiceResult<StreamStoppedResponse> {
        caller.require_streamer()?;
        let account = AccountService::new(self.ctx).get_streamer(caller.id).await?;

        let elapsed = account.live.elapsed_hours(Utc::now());
        self.ctx
            .ledger()
            .set_live_status(caller.id, false, None, None)
            .await?;

        let (total_hours, level) = if elapsed > 0.0 {
            ProgressService::new(self.ctx)
                .credit_hours(caller.id, elapsed)
                .await?
        } else {
            (account.live.hours_streamed, account.level)
        };

        info!(session_hours = elapsed, total_hours, level, "Stream stopped");

        self.announce(caller.id, false, None).await;

        Ok(StreamStoppedResponse {
            hours_streamed: elapsed,
            total_hours,
            level,
        })
    }

    /// Streamers currently live
    #[instrument(skip(self))]
    pub async fn live_streamers(&self) -> ServiceResult<Vec<LiveStreamerResponse>> {
        let live = self.ctx.ledger().live_streamers().await?;
        Ok(live.into_iter().map(LiveStreamerResponse::from).collect())
    }

    async fn announce(&self, streamer_id: Snowflake, is_live: bool, channel_name: Option<String>) {
        let event = RoomEvent::StreamerStatusChanged {
            streamer_id,
            is_live,
            channel_name,
        };
        if let Err(e) = self.ctx.publisher().publish(event).await {
            warn!(streamer_id = %streamer_id, error = %e, "Failed to announce status change");
        }
    }
}
