//! Economy engine
//!
//! Gift transfers and coin purchases. Each ledger step is a single atomic store call;
//! the debit is conditional, so two transfers racing for the same coins cannot both
//! succeed. When a later step fails the earlier ones are compensated in reverse order.

use chrono::Utc;
use live_core::entities::{AccountRole, Gift, GiftReceipt, Purchase, Transaction};
use live_core::events::RoomEvent;
use live_core::leveling::default_level;
use live_core::{DomainError, Snowflake};
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

use crate::dto::{GiftTransferResponse, PurchaseResponse};

use super::account::{AccountService, Caller};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Gift history page size
pub const GIFT_HISTORY_LIMIT: i64 = 50;

/// A completed transfer, with what the room announcement needs
#[derive(Debug, Clone)]
pub struct GiftTransfer {
    pub sender_id: Snowflake,
    pub sender_name: String,
    pub receiver_id: Snowflake,
    pub gift: Gift,
    pub amount: i64,
    pub total_cost: i64,
    pub total_points: i64,
    pub transaction_id: Snowflake,
    pub balances: GiftTransferResponse,
}

impl GiftTransfer {
    /// Payload forwarded verbatim to the receiver's room
    pub fn announcement(&self) -> Value {
        json!({
            "transactionId": self.transaction_id,
            "senderId": self.sender_id,
            "senderName": self.sender_name,
            "receiverId": self.receiver_id,
            "giftId": self.gift.id,
            "giftName": self.gift.name,
            "emoji": self.gift.emoji,
            "amount": self.amount,
            "cost": self.total_cost,
            "points": self.total_points,
            "timestamp": Utc::now(),
        })
    }
}

/// Economy service
pub struct EconomyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EconomyService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Move `gift.cost * amount` coins out of the sender and credit
    /// `gift.points * amount` points to the receiving streamer
    #[instrument(skip(self))]
    pub async fn send_gift(
        &self,
        sender_id: Snowflake,
        receiver_id: Snowflake,
        gift_id: Snowflake,
        amount: i64,
    ) -> ServiceResult<GiftTransfer> {
        if amount < 1 {
            return Err(DomainError::InvalidAmount(amount).into());
        }
        if sender_id == receiver_id {
            return Err(DomainError::ValidationError("cannot send a gift to yourself".into()).into());
        }

        let ledger = self.ctx.ledger();

        let gift = self
            .ctx
            .gift_catalog()
            .find_by_id(gift_id)
            .await?
            .ok_or(DomainError::GiftNotFound(gift_id))?;

        let accounts = AccountService::new(self.ctx);
        let sender = accounts.get(sender_id).await?;
        accounts.get_streamer(receiver_id).await?;

        let total_cost = gift
            .total_cost(amount)
            .ok_or(DomainError::InvalidAmount(amount))?;
        let total_points = gift
            .total_points(amount)
            .ok_or(DomainError::InvalidAmount(amount))?;

        if !sender.can_afford(total_cost) {
            return Err(DomainError::InsufficientFunds {
                required: total_cost,
                available: sender.coins,
            }
            .into());
        }

        if !ledger.increment_coins(sender_id, -total_cost).await? {
            warn!(sender_id = %sender_id, total_cost, "Conditional debit matched no row");
            return Err(DomainError::ConcurrencyConflict.into());
        }

        let receiver_points = match ledger.increment_points(receiver_id, total_points).await {
            Ok(points) => points,
            Err(e) => {
                self.refund(sender_id, total_cost).await;
                return Err(e.into());
            }
        };

        let tx = Transaction::gift_sent(
            self.ctx.generate_id(),
            sender_id,
            receiver_id,
            gift.id,
            &gift.name,
            amount,
            total_cost,
        );
        if let Err(e) = ledger.append_transaction(&tx).await {
            self.revert_credit(receiver_id, total_points).await;
            self.refund(sender_id, total_cost).await;
            return Err(e.into());
        }

        // the ledger is already consistent; a failed level write only leaves the level stale
        if let Err(e) = ledger
            .set_level(receiver_id, default_level(receiver_points, AccountRole::Streamer))
            .await
        {
            warn!(receiver_id = %receiver_id, error = %e, "Failed to update receiver level");
        }

        let sender_after = accounts.get(sender_id).await?;
        let receiver_after = accounts.get(receiver_id).await?;

        info!(
            transaction_id = %tx.id,
            sender_id = %sender_id,
            receiver_id = %receiver_id,
            gift = %gift.name,
            amount,
            total_cost,
            "Gift sent"
        );

        Ok(GiftTransfer {
            sender_id,
            sender_name: sender.display_name,
            receiver_id,
            gift,
            amount,
            total_cost,
            total_points,
            transaction_id: tx.id,
            balances: GiftTransferResponse {
                sender_coins: sender_after.coins,
                receiver_points: receiver_after.points,
                receiver_level: receiver_after.level,
            },
        })
    }

    /// Tell the receiver's room about a completed transfer
    ///
    /// Never fails: the ledger mutation is already committed.
    #[instrument(skip(self, transfer), fields(receiver_id = %transfer.receiver_id))]
    pub async fn announce_gift(&self, transfer: &GiftTransfer) {
        let event = RoomEvent::GiftReceived {
            streamer_id: transfer.receiver_id,
            payload: transfer.announcement(),
        };
        if let Err(e) = self.ctx.publisher().publish(event).await {
            warn!(error = %e, "Failed to announce gift");
        }
    }

    /// Credit purchased coins to the caller
    #[instrument(skip(self), fields(account_id = %caller.id))]
    pub async fn purchase_coins(
        &self,
        caller: &Caller,
        coin_amount: i64,
        price: f64,
    ) -> ServiceResult<PurchaseResponse> {
        if coin_amount < 1 {
            return Err(DomainError::InvalidAmount(coin_amount).into());
        }

        let accounts = AccountService::new(self.ctx);
        accounts.ensure(caller).await?;

        let ledger = self.ctx.ledger();
        if !ledger.increment_coins(caller.id, coin_amount).await? {
            // the account exists, so an unchanged balance means the sum would overflow
            return Err(DomainError::InvalidAmount(coin_amount).into());
        }

        let purchase = Purchase::completed(self.ctx.generate_id(), caller.id, coin_amount, price);
        let tx = Transaction::coins_purchased(self.ctx.generate_id(), caller.id, coin_amount);

        let recorded = match ledger.append_purchase(&purchase).await {
            Ok(()) => ledger.append_transaction(&tx).await,
            Err(e) => Err(e),
        };
        if let Err(e) = recorded {
            if !ledger.increment_coins(caller.id, -coin_amount).await.unwrap_or(false) {
                error!(account_id = %caller.id, coin_amount, "Failed to reverse unrecorded purchase");
            }
            return Err(e.into());
        }

        let account = accounts.get(caller.id).await?;

        info!(purchase_id = %purchase.id, coin_amount, new_balance = account.coins, "Coins purchased");

        Ok(PurchaseResponse {
            new_balance: account.coins,
            coins_purchased: coin_amount,
        })
    }

    /// Most recent gifts received by an account, newest first
    #[instrument(skip(self))]
    pub async fn gift_history(&self, receiver_id: Snowflake) -> ServiceResult<Vec<GiftReceipt>> {
        Ok(self
            .ctx
            .ledger()
            .gifts_received(receiver_id, GIFT_HISTORY_LIMIT)
            .await?)
    }

    async fn refund(&self, sender_id: Snowflake, total_cost: i64) {
        match self.ctx.ledger().increment_coins(sender_id, total_cost).await {
            Ok(true) => info!(sender_id = %sender_id, total_cost, "Debit compensated"),
            Ok(false) => error!(sender_id = %sender_id, total_cost, "Refund matched no account"),
            Err(e) => error!(sender_id = %sender_id, total_cost, error = %e, "Refund failed"),
        }
    }

    async fn revert_credit(&self, receiver_id: Snowflake, total_points: i64) {
        if let Err(e) = self
            .ctx
            .ledger()
            .increment_points(receiver_id, -total_points)
            .await
        {
            error!(receiver_id = %receiver_id, total_points, error = %e, "Credit reversal failed");
        }
    }
}
