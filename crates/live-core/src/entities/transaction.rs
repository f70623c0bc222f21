//! Transaction entity - append-only ledger record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value_objects::Snowflake;

/// Kind tag of a ledger record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    GiftSent,
    CoinsPurchased,
}

impl TransactionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GiftSent => "gift_sent",
            Self::CoinsPurchased => "coins_purchased",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gift_sent" => Ok(Self::GiftSent),
            "coins_purchased" => Ok(Self::CoinsPurchased),
            other => Err(format!("unknown transaction kind: {other}")),
        }
    }
}

/// Immutable ledger record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub receiver_id: Option<Snowflake>,
    pub gift_id: Option<Snowflake>,
    pub kind: TransactionKind,
    /// Coins actually debited (gift) or credited (purchase)
    pub amount: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Record of a gift transfer; `units` is the number of gifts, `total_cost` the coins debited
    pub fn gift_sent(
        id: Snowflake,
        sender_id: Snowflake,
        receiver_id: Snowflake,
        gift_id: Snowflake,
        gift_name: &str,
        units: i64,
        total_cost: i64,
    ) -> Self {
        Self {
            id,
            sender_id,
            receiver_id: Some(receiver_id),
            gift_id: Some(gift_id),
            kind: TransactionKind::GiftSent,
            amount: total_cost,
            description: format!("Sent {units} {gift_name}(s)"),
            created_at: Utc::now(),
        }
    }

    pub fn coins_purchased(id: Snowflake, buyer_id: Snowflake, coins: i64) -> Self {
        Self {
            id,
            sender_id: buyer_id,
            receiver_id: None,
            gift_id: None,
            kind: TransactionKind::CoinsPurchased,
            amount: coins,
            description: format!("Purchased {coins} coins"),
            created_at: Utc::now(),
        }
    }
}

/// A received gift joined with sender and catalog details, for history views
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftReceipt {
    pub transaction_id: Snowflake,
    pub sender_id: Snowflake,
    pub sender_name: String,
    pub gift_id: Option<Snowflake>,
    pub gift_name: Option<String>,
    pub gift_emoji: Option<String>,
    pub gift_points: Option<i64>,
    pub amount: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gift_sent_records_total_cost() {
        let tx = Transaction::gift_sent(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            Snowflake::new(4),
            "Rose",
            2,
            20,
        );
        assert_eq!(tx.kind, TransactionKind::GiftSent);
        assert_eq!(tx.amount, 20);
        assert_eq!(tx.description, "Sent 2 Rose(s)");
        assert_eq!(tx.receiver_id, Some(Snowflake::new(3)));
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [TransactionKind::GiftSent, TransactionKind::CoinsPurchased] {
            assert_eq!(kind.as_str().parse::<TransactionKind>(), Ok(kind));
        }
        assert!("refund".parse::<TransactionKind>().is_err());
    }
}
