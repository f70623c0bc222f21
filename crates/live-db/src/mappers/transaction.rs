//! Gift receipt model -> entity mapper

use live_core::entities::GiftReceipt;
use live_core::value_objects::Snowflake;

use crate::models::GiftReceiptModel;

impl From<GiftReceiptModel> for GiftReceipt {
    fn from(model: GiftReceiptModel) -> Self {
        GiftReceipt {
            transaction_id: Snowflake::new(model.id),
            sender_id: Snowflake::new(model.sender_id),
            sender_name: model.sender_name,
            gift_id: model.gift_id.map(Snowflake::new),
            gift_name: model.gift_name,
            gift_emoji: model.gift_emoji,
            gift_points: model.gift_points,
            amount: model.amount,
            description: model.description,
            created_at: model.created_at,
        }
    }
}
