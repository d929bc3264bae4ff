use crate::entities::order_records::{GetOrderById, MarkOrderPaid, OrderId, OrderRecord};
use crate::framework::DatabaseProcessor;
use async_trait::async_trait;
use kanau::processor::Processor;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum OrderStoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("order {0} disappeared while being updated")]
    Vanished(OrderId),
}

/// Access to the orders the callback verifier may settle.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn get_order(&self, order_id: OrderId) -> Result<Option<OrderRecord>, OrderStoreError>;

    /// Persist `paid = true` for `order` and return the stored row.
    async fn set_paid(&self, order: &OrderRecord) -> Result<OrderRecord, OrderStoreError>;
}

#[async_trait]
impl OrderStore for DatabaseProcessor {
    async fn get_order(&self, order_id: OrderId) -> Result<Option<OrderRecord>, OrderStoreError> {
        Ok(self.process(GetOrderById { order_id }).await?)
    }

    async fn set_paid(&self, order: &OrderRecord) -> Result<OrderRecord, OrderStoreError> {
        self.process(MarkOrderPaid { order_id: order.id })
            .await?
            .ok_or(OrderStoreError::Vanished(order.id))
    }
}

/// A thread-safe in-memory order store.
///
/// Counts lookups and writes so tests can assert that rejected callbacks
/// never reached storage.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, OrderRecord>>>,
    lookups: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an order.
    pub async fn insert(&self, order: OrderRecord) {
        self.orders.write().await.insert(order.id, order);
    }

    /// Number of `get_order` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Number of `set_paid` calls served so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn get_order(&self, order_id: OrderId) -> Result<Option<OrderRecord>, OrderStoreError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.orders.read().await.get(&order_id).cloned())
    }

    async fn set_paid(&self, order: &OrderRecord) -> Result<OrderRecord, OrderStoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        let mut orders = self.orders.write().await;
        let stored = orders
            .get_mut(&order.id)
            .ok_or(OrderStoreError::Vanished(order.id))?;
        stored.paid = true;
        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_in_memory_order_store() {
        let store = InMemoryOrderStore::new();
        store.insert(OrderRecord::new(1, dec!(10.00))).await;

        let order = store.get_order(1).await.unwrap().unwrap();
        assert!(!order.paid);
        assert!(store.get_order(2).await.unwrap().is_none());

        let updated = store.set_paid(&order).await.unwrap();
        assert!(updated.paid);
        assert!(store.get_order(1).await.unwrap().unwrap().paid);

        assert_eq!(store.lookups(), 3);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_set_paid_is_idempotent() {
        let store = InMemoryOrderStore::new();
        let order = OrderRecord::new(7, dec!(5.50));
        store.insert(order.clone()).await;

        let first = store.set_paid(&order).await.unwrap();
        let second = store.set_paid(&order).await.unwrap();
        assert_eq!(first, second);
        assert!(second.paid);
    }

    #[tokio::test]
    async fn test_set_paid_missing_order() {
        let store = InMemoryOrderStore::new();
        let ghost = OrderRecord::new(404, dec!(1.00));
        assert!(matches!(
            store.set_paid(&ghost).await,
            Err(OrderStoreError::Vanished(404))
        ));
    }
}
