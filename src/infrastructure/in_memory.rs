use crate::domain::ports::{OrderLedger, OrderSnapshot};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory order ledger.
///
/// Uses `Arc<RwLock<HashMap<String, OrderSnapshot>>>` so clones share state.
/// Suited to tests and to replaying notifications against an order export.
#[derive(Default, Clone)]
pub struct InMemoryOrderLedger {
    orders: Arc<RwLock<HashMap<String, OrderSnapshot>>>,
}

impl InMemoryOrderLedger {
    /// Creates a new, empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the snapshot for `order.order_id`.
    pub async fn upsert(&self, order: OrderSnapshot) {
        let mut orders = self.orders.write().await;
        orders.insert(order.order_id.clone(), order);
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

#[async_trait]
impl OrderLedger for InMemoryOrderLedger {
    async fn find_order(&self, order_id: &str) -> Result<Option<OrderSnapshot>> {
        let orders = self.orders.read().await;
        Ok(orders.get(order_id).cloned())
    }
}
