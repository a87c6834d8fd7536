use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Failed,
}

impl OrderStatus {
    /// A settled order has already consumed its payment notification.
    pub fn is_settled(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

/// What the business layer knows about an order awaiting payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_id: String,
    /// Major currency unit.
    pub amount: Decimal,
    pub status: OrderStatus,
}

/// Read access to the order store, owned by the business layer.
#[async_trait]
pub trait OrderLedger: Send + Sync {
    async fn find_order(&self, order_id: &str) -> Result<Option<OrderSnapshot>>;
}

pub type OrderLedgerBox = Box<dyn OrderLedger>;
