//! Spectator progress model -> entity mapper

use live_core::entities::SpectatorProgress;
use live_core::value_objects::Snowflake;

use crate::models::ProgressModel;

impl From<ProgressModel> for SpectatorProgress {
    fn from(model: ProgressModel) -> Self {
        SpectatorProgress {
            spectator_id: Snowflake::new(model.spectator_id),
            streamer_id: Snowflake::new(model.streamer_id),
            points: model.points,
            level: model.level,
            updated_at: model.updated_at,
        }
    }
}
