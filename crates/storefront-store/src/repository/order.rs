//! # Order Store
//!
//! The order book plus the `orders` snapshot.
//!
//! Lookups never fail: a missing id is `None`. Mutations that the book
//! rejects (unknown id, illegal transition) leave both memory and storage
//! untouched.

use chrono::Utc;
use storefront_core::error::CoreResult;
use storefront_core::order::{NewOrder, Order, OrderBook, OrderCommand};
use storefront_core::types::OrderStatus;
use tracing::{info, warn};

use super::{hydrate, persist};
use crate::kv::{keys, KeyValueStore};

pub struct OrderStore<S> {
    kv: S,
    book: OrderBook,
}

impl<S: KeyValueStore> OrderStore<S> {
    pub async fn load(kv: S) -> Self {
        let book: OrderBook = hydrate(&kv, keys::ORDERS).await;
        OrderStore { kv, book }
    }

    /// Applies a command and saves the whole list on success.
    pub async fn dispatch(&mut self, command: OrderCommand) -> CoreResult<Order> {
        let name = command.name();

        let order = match self.book.apply(command) {
            Ok(order) => order,
            Err(e) => {
                warn!(command = name, error = %e, "Order command rejected");
                return Err(e);
            }
        };

        info!(
            command = name,
            order_id = %order.id,
            status = %order.status,
            total = order.total,
            "Order updated"
        );

        persist(&self.kv, keys::ORDERS, &self.book).await;
        Ok(order)
    }

    pub async fn create_order(&mut self, order: NewOrder) -> Order {
        let order = self.book.create(order, Utc::now()).clone();
        info!(
            order_id = %order.id,
            items = order.items.len(),
            total = order.total,
            "Order created"
        );

        persist(&self.kv, keys::ORDERS, &self.book).await;
        order
    }

    pub async fn update_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
        description: Option<String>,
    ) -> CoreResult<Order> {
        self.dispatch(OrderCommand::UpdateStatus {
            order_id: order_id.to_string(),
            status,
            description,
            at: Utc::now(),
        })
        .await
    }

    pub async fn cancel_order(&mut self, order_id: &str, reason: Option<String>) -> CoreResult<Order> {
        self.dispatch(OrderCommand::Cancel {
            order_id: order_id.to_string(),
            reason,
            at: Utc::now(),
        })
        .await
    }

    pub fn get_by_id(&self, order_id: &str) -> Option<&Order> {
        self.book.get_by_id(order_id)
    }

    pub fn filter_by_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.book.filter_by_status(status)
    }

    /// Newest first.
    pub fn list(&self) -> &[Order] {
        self.book.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use storefront_core::checkout::{OrderTotals, ShippingInfo};
    use storefront_core::error::CoreError;
    use storefront_core::types::{PaymentMethod, PaymentStatus};

    fn new_order(subtotal: i64) -> NewOrder {
        NewOrder {
            items: vec![],
            shipping_info: ShippingInfo::default(),
            payment_method: PaymentMethod::BankTransfer,
            totals: OrderTotals {
                subtotal,
                shipping: 0,
                tax: subtotal / 10,
                total: 0,
            },
        }
    }

    #[tokio::test]
    async fn test_create_and_reload() {
        let kv = MemoryStore::new();
        let mut store = OrderStore::load(kv.clone()).await;
        let first = store.create_order(new_order(100_000)).await;
        let second = store.create_order(new_order(200_000)).await;

        let reloaded = OrderStore::load(kv).await;
        let ids: Vec<_> = reloaded.list().iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids, vec![second.id, first.id.clone()]);
        assert_eq!(reloaded.get_by_id(&first.id).map(|o| o.total), Some(110_000));
    }

    #[tokio::test]
    async fn test_cancel_persists_refund() {
        let kv = MemoryStore::new();
        let mut store = OrderStore::load(kv.clone()).await;
        let order = store.create_order(new_order(100_000)).await;

        let cancelled = store
            .cancel_order(&order.id, Some("Out of stock".to_string()))
            .await
            .unwrap();
        assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);
        assert_eq!(cancelled.history.len(), 2);

        let reloaded = OrderStore::load(kv).await;
        assert_eq!(reloaded.filter_by_status(OrderStatus::Cancelled).len(), 1);
    }

    #[tokio::test]
    async fn test_failed_write_still_records_order() {
        let kv = MemoryStore::new();
        let mut store = OrderStore::load(kv.clone()).await;
        kv.set_fail_writes(true);

        let order = store.create_order(new_order(100_000)).await;
        let shipped = store
            .update_status(&order.id, OrderStatus::Shipped, None)
            .await
            .unwrap();
        assert_eq!(shipped.payment_status, PaymentStatus::Paid);
        assert_eq!(store.list().len(), 1);
        assert!(kv.get(keys::ORDERS).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejected_update_writes_nothing() {
        let kv = MemoryStore::new();
        let mut store = OrderStore::load(kv.clone()).await;
        let order = store.create_order(new_order(100_000)).await;
        store
            .update_status(&order.id, OrderStatus::Delivered, None)
            .await
            .unwrap();
        let snapshot = kv.get(keys::ORDERS).await.unwrap();

        let err = store
            .update_status(&order.id, OrderStatus::Shipped, None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidStatusTransition { .. }));
        assert_eq!(kv.get(keys::ORDERS).await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let mut store = OrderStore::load(MemoryStore::new()).await;
        assert!(store.get_by_id("ORD-missing").is_none());
        assert!(matches!(
            store.cancel_order("ORD-missing", None).await,
            Err(CoreError::OrderNotFound(_))
        ));
    }
}
