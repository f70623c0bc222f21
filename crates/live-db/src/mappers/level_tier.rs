//! Level tier model -> entity mapper

use live_core::entities::LevelTier;
use live_core::value_objects::Snowflake;

use crate::models::LevelTierModel;

impl From<LevelTierModel> for LevelTier {
    fn from(model: LevelTierModel) -> Self {
        LevelTier {
            id: Snowflake::new(model.id),
            streamer_id: Snowflake::new(model.streamer_id),
            level_number: model.level_number,
            level_name: model.level_name,
            required_points: model.required_points,
            created_at: model.created_at,
        }
    }
}
