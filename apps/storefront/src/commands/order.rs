//! # Order Commands
//!
//! Order history and status changes.
//!
//! ## Status Track
//! ```text
//! processing ──► confirmed ──► shipped ──► delivered
//!     │
//!     └────────► cancelled
//! ```
//! Moving backwards or off a terminal status is a `BUSINESS_LOGIC` error and
//! changes nothing.

use storefront_core::{Order, OrderStatus};
use storefront_store::KeyValueStore;
use tracing::debug;

use crate::error::ApiError;
use crate::state::OrderState;

/// Lists orders newest first, optionally only those with `status`.
pub async fn list_orders<S: KeyValueStore>(
    orders: &OrderState<S>,
    status: Option<&str>,
) -> Result<Vec<Order>, ApiError> {
    debug!(status = ?status, "list_orders command");

    let store = orders.lock().await;
    match status {
        Some(raw) => {
            let status: OrderStatus = raw.parse()?;
            Ok(store.filter_by_status(status).into_iter().cloned().collect())
        }
        None => Ok(store.list().to_vec()),
    }
}

/// Looks up one order. A missing id is `None`, not an error.
pub async fn get_order<S: KeyValueStore>(orders: &OrderState<S>, order_id: &str) -> Option<Order> {
    debug!(order_id = %order_id, "get_order command");
    orders.lock().await.get_by_id(order_id).cloned()
}

/// Moves an order along its status track, appending a history entry.
///
/// ## Errors
/// - `NOT_FOUND` for an unknown id
/// - `VALIDATION_ERROR` for an unknown status name
/// - `BUSINESS_LOGIC` for a disallowed transition
pub async fn update_order_status<S: KeyValueStore>(
    orders: &OrderState<S>,
    order_id: &str,
    status: &str,
    description: Option<String>,
) -> Result<Order, ApiError> {
    debug!(order_id = %order_id, status = %status, "update_order_status command");
    let status: OrderStatus = status.parse()?;

    let mut store = orders.lock().await;
    Ok(store.update_status(order_id, status, description).await?)
}

/// Cancels an order that has not been confirmed yet.
pub async fn cancel_order<S: KeyValueStore>(
    orders: &OrderState<S>,
    order_id: &str,
    reason: Option<String>,
) -> Result<Order, ApiError> {
    debug!(order_id = %order_id, "cancel_order command");
    let mut store = orders.lock().await;
    Ok(store.cancel_order(order_id, reason).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::{NewOrder, OrderTotals, PaymentMethod, PaymentStatus, ShippingInfo};
    use storefront_store::MemoryStore;

    async fn with_orders(count: usize) -> (OrderState<MemoryStore>, Vec<String>) {
        let state = OrderState::load(MemoryStore::new()).await;
        let mut ids = Vec::new();
        for i in 0..count {
            let subtotal = 100_000 * (i as i64 + 1);
            let order = state
                .lock()
                .await
                .create_order(NewOrder {
                    items: vec![],
                    shipping_info: ShippingInfo::default(),
                    payment_method: PaymentMethod::EWallet,
                    totals: OrderTotals {
                        subtotal,
                        shipping: 15_000,
                        tax: subtotal * 11 / 100,
                        total: 0,
                    },
                })
                .await;
            ids.push(order.id);
        }
        (state, ids)
    }

    #[tokio::test]
    async fn test_list_newest_first_and_filter() {
        let (orders, ids) = with_orders(2).await;
        update_order_status(&orders, &ids[0], "confirmed", None)
            .await
            .unwrap();

        let all = list_orders(&orders, None).await.unwrap();
        assert_eq!(all[0].id, ids[1]);

        let confirmed = list_orders(&orders, Some("confirmed")).await.unwrap();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].payment_status, PaymentStatus::Paid);

        let err = list_orders(&orders, Some("lost")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_get_missing_order_is_none() {
        let (orders, _) = with_orders(1).await;
        assert!(get_order(&orders, "ORD-00000000-XXXXXXXX").await.is_none());
    }

    #[tokio::test]
    async fn test_status_errors() {
        let (orders, ids) = with_orders(1).await;

        let err = update_order_status(&orders, "ORD-missing", "shipped", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        update_order_status(&orders, &ids[0], "shipped", Some("Via JNE".to_string()))
            .await
            .unwrap();
        let err = update_order_status(&orders, &ids[0], "confirmed", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let order = get_order(&orders, &ids[0]).await.unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.history.len(), 2);
        assert_eq!(order.history[1].description, "Via JNE");
    }

    #[tokio::test]
    async fn test_cancel_only_while_processing() {
        let (orders, ids) = with_orders(2).await;

        let cancelled = cancel_order(&orders, &ids[0], Some("Changed my mind".to_string()))
            .await
            .unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);

        update_order_status(&orders, &ids[1], "confirmed", None)
            .await
            .unwrap();
        let err = cancel_order(&orders, &ids[1], None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }
}
