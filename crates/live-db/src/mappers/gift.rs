//! Gift model -> entity mapper

use live_core::entities::Gift;
use live_core::value_objects::Snowflake;

use crate::models::GiftModel;

impl From<GiftModel> for Gift {
    fn from(model: GiftModel) -> Self {
        Gift {
            id: Snowflake::new(model.id),
            streamer_id: Snowflake::new(model.streamer_id),
            name: model.name,
            emoji: model.emoji,
            cost: model.cost,
            points: model.points,
            description: model.description,
            created_at: model.created_at,
        }
    }
}
