//! Fixtures shared by the service unit tests

use std::sync::Arc;

use live_common::JwtService;
use live_core::entities::{AccountRole, Gift, NewAccount};
use live_core::traits::{GiftCatalog, LedgerStore};
use live_core::Snowflake;

use crate::memory::{MemoryLedger, RecordingPublisher};
use crate::services::{ServiceContext, ServiceContextBuilder};

pub fn memory_context() -> (ServiceContext, Arc<MemoryLedger>, Arc<RecordingPublisher>) {
    let ledger = Arc::new(MemoryLedger::new());
    let publisher = Arc::new(RecordingPublisher::new());
    let ctx = ServiceContextBuilder::new()
        .memory(ledger.clone())
        .publisher(publisher.clone())
        .jwt_service(Arc::new(JwtService::new("test-secret", 3600)))
        .build()
        .unwrap();
    (ctx, ledger, publisher)
}

pub async fn seed_account(ledger: &MemoryLedger, id: i64, role: AccountRole, coins: i64) -> Snowflake {
    let id = Snowflake::new(id);
    ledger
        .create_account_if_missing(&NewAccount::new(id, role, format!("{role}-{id}")))
        .await
        .unwrap();
    if coins > 0 {
        ledger.increment_coins(id, coins).await.unwrap();
    }
    id
}

pub async fn seed_gift(
    ledger: &MemoryLedger,
    id: i64,
    streamer: Snowflake,
    name: &str,
    cost: i64,
    points: i64,
) -> Gift {
    let gift = Gift::new(Snowflake::new(id), streamer, name.into(), "🎁".into(), cost, points);
    GiftCatalog::create(ledger, &gift).await.unwrap();
    gift
}
