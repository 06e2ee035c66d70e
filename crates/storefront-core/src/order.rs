//! # Orders
//!
//! Finalized orders and the in-memory order book.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  NewOrder ──create──► Order { status: processing, payment: pending }    │
//! │                          │    history: [processing]                     │
//! │                          │                                              │
//! │             update_status(confirmed)  ──► payment: paid                 │
//! │             update_status(shipped)                                      │
//! │             update_status(delivered)  ──► terminal                      │
//! │                          │                                              │
//! │             cancel (processing only)  ──► payment: refunded, terminal   │
//! │                                                                         │
//! │  Every accepted change appends exactly one StatusEntry.                 │
//! │  A rejected change leaves the order untouched.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are frozen at creation. Nothing here recomputes them from the items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartItem};
use crate::checkout::{OrderTotals, ShippingInfo};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{OrderStatus, PaymentMethod, PaymentStatus};

// =============================================================================
// Order Item
// =============================================================================

/// A cart line frozen into an order, priced at the time of purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub price: i64,
    pub quantity: i64,
    pub line_total: i64,
}

impl From<&CartItem> for OrderItem {
    fn from(item: &CartItem) -> Self {
        OrderItem {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            brand: item.brand.clone(),
            image: item.image.clone(),
            size: item.size.clone(),
            color: item.color.clone(),
            price: item.price,
            quantity: item.quantity,
            line_total: item.line_total().amount(),
        }
    }
}

// =============================================================================
// Status History
// =============================================================================

/// One entry in an order's status log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

impl StatusEntry {
    fn new(status: OrderStatus, description: Option<String>, at: DateTime<Utc>) -> Self {
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| status.default_description().to_string());

        StatusEntry {
            status,
            timestamp: at,
            description,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// `ORD-YYYYMMDD-XXXXXXXX`
    pub id: String,
    pub items: Vec<OrderItem>,
    pub shipping_info: ShippingInfo,
    pub payment_method: PaymentMethod,
    pub subtotal: i64,
    pub shipping: i64,
    pub tax: i64,
    pub total: i64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub history: Vec<StatusEntry>,
    pub tracking_number: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_minor(self.total)
    }

    pub fn totals(&self) -> OrderTotals {
        OrderTotals {
            subtotal: self.subtotal,
            shipping: self.shipping,
            tax: self.tax,
            total: self.total,
        }
    }

    /// Number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn latest_entry(&self) -> Option<&StatusEntry> {
        self.history.last()
    }

    pub fn can_cancel(&self) -> bool {
        self.status.can_transition_to(OrderStatus::Cancelled)
    }
}

/// Checkout output, ready to become an [`Order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub items: Vec<OrderItem>,
    pub shipping_info: ShippingInfo,
    pub payment_method: PaymentMethod,
    pub totals: OrderTotals,
}

impl NewOrder {
    /// Snapshots every line of the cart.
    pub fn from_cart(
        cart: &Cart,
        shipping_info: ShippingInfo,
        payment_method: PaymentMethod,
        totals: OrderTotals,
    ) -> Self {
        NewOrder {
            items: cart.items().iter().map(OrderItem::from).collect(),
            shipping_info,
            payment_method,
            totals,
        }
    }
}

// =============================================================================
// Identifiers
// =============================================================================

fn short_token() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

/// `ORD-20261018-1A2B3C4D`
pub fn generate_order_id(at: DateTime<Utc>) -> String {
    format!("ORD-{}-{}", at.format("%Y%m%d"), short_token())
}

/// `TRK202610181A2B3C4D`
pub fn generate_tracking_number(at: DateTime<Utc>) -> String {
    format!("TRK{}{}", at.format("%Y%m%d"), short_token())
}

// =============================================================================
// Order Book
// =============================================================================

/// Mutations the order book accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderCommand {
    Create {
        order: NewOrder,
        at: DateTime<Utc>,
    },
    UpdateStatus {
        order_id: String,
        status: OrderStatus,
        description: Option<String>,
        at: DateTime<Utc>,
    },
    Cancel {
        order_id: String,
        reason: Option<String>,
        at: DateTime<Utc>,
    },
}

impl OrderCommand {
    pub fn name(&self) -> &'static str {
        match self {
            OrderCommand::Create { .. } => "create",
            OrderCommand::UpdateStatus { .. } => "update_status",
            OrderCommand::Cancel { .. } => "cancel",
        }
    }
}

/// All orders, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        OrderBook::default()
    }

    pub fn from_orders(orders: Vec<Order>) -> Self {
        OrderBook { orders }
    }

    /// Applies a command and returns a copy of the affected order.
    pub fn apply(&mut self, command: OrderCommand) -> CoreResult<Order> {
        match command {
            OrderCommand::Create { order, at } => Ok(self.create(order, at).clone()),
            OrderCommand::UpdateStatus {
                order_id,
                status,
                description,
                at,
            } => self.update_status(&order_id, status, description, at).cloned(),
            OrderCommand::Cancel { order_id, reason, at } => {
                self.cancel(&order_id, reason, at).cloned()
            }
        }
    }

    /// Creates an order and puts it at the front of the list.
    ///
    /// `total` is recomputed from subtotal + shipping + tax.
    pub fn create(&mut self, new: NewOrder, at: DateTime<Utc>) -> &Order {
        let totals = OrderTotals::new(
            Money::from_minor(new.totals.subtotal),
            Money::from_minor(new.totals.shipping),
            Money::from_minor(new.totals.tax),
        );

        let order = Order {
            id: generate_order_id(at),
            items: new.items,
            shipping_info: new.shipping_info,
            payment_method: new.payment_method,
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            tax: totals.tax,
            total: totals.total,
            status: OrderStatus::Processing,
            payment_status: PaymentStatus::Pending,
            history: vec![StatusEntry::new(OrderStatus::Processing, None, at)],
            tracking_number: generate_tracking_number(at),
            created_at: at,
            updated_at: at,
        };

        self.orders.insert(0, order);
        &self.orders[0]
    }

    /// Moves an order to a new status and logs the change.
    ///
    /// ## Errors
    /// - `OrderNotFound` if no order has this id
    /// - `InvalidStatusTransition` if the move is backwards, repeats the
    ///   current status, leaves a terminal status, or cancels past processing
    pub fn update_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
        description: Option<String>,
        at: DateTime<Utc>,
    ) -> CoreResult<&Order> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| CoreError::OrderNotFound(order_id.to_string()))?;

        if !order.status.can_transition_to(status) {
            return Err(CoreError::InvalidStatusTransition {
                order_id: order.id.clone(),
                from: order.status,
                to: status,
            });
        }

        order.status = status;
        order.payment_status = status.payment_after(order.payment_status);
        order.history.push(StatusEntry::new(status, description, at));
        order.updated_at = at;

        Ok(order)
    }

    /// Same as `update_status(id, Cancelled, reason)`.
    pub fn cancel(
        &mut self,
        order_id: &str,
        reason: Option<String>,
        at: DateTime<Utc>,
    ) -> CoreResult<&Order> {
        self.update_status(order_id, OrderStatus::Cancelled, reason, at)
    }

    pub fn get_by_id(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    pub fn filter_by_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.status == status).collect()
    }

    pub fn list(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_760_000_000 + secs, 0).unwrap()
    }

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Dewi".to_string(),
            last_name: "Lestari".to_string(),
            email: "dewi@example.com".to_string(),
            phone: "0813999888".to_string(),
            address: "Jl. Asia Afrika 8".to_string(),
            city: "Bandung".to_string(),
            province: Some("Jawa Barat".to_string()),
            zip_code: "40112".to_string(),
            notes: None,
        }
    }

    fn new_order(subtotal: i64, shipping_fee: i64, tax: i64) -> NewOrder {
        NewOrder {
            items: vec![OrderItem {
                product_id: "sneaker-01".to_string(),
                name: "Runner".to_string(),
                brand: "Lari".to_string(),
                image: "/img/runner.jpg".to_string(),
                size: Some("42".to_string()),
                color: None,
                price: 500_000,
                quantity: 2,
                line_total: 1_000_000,
            }],
            shipping_info: shipping(),
            payment_method: PaymentMethod::CreditCard,
            totals: OrderTotals {
                subtotal,
                shipping: shipping_fee,
                tax,
                total: 0,
            },
        }
    }

    #[test]
    fn test_create_order() {
        let mut book = OrderBook::new();
        let order = book.create(new_order(1_000_000, 0, 110_000), at(0)).clone();

        assert_eq!(order.total, 1_110_000);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.history.len(), 1);
        assert_eq!(order.history[0].status, OrderStatus::Processing);
        assert!(order.id.starts_with("ORD-20251009-"));
        assert_eq!(order.id.len(), "ORD-20251009-".len() + 8);
        assert!(order.tracking_number.starts_with("TRK20251009"));
        assert_eq!(order.item_count(), 2);
    }

    #[test]
    fn test_newest_first() {
        let mut book = OrderBook::new();
        let first = book.create(new_order(100_000, 15_000, 11_000), at(0)).id.clone();
        let second = book.create(new_order(200_000, 15_000, 22_000), at(60)).id.clone();

        let ids: Vec<_> = book.list().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str()]);
    }

    #[test]
    fn test_cancel_refunds_and_logs_once() {
        let mut book = OrderBook::new();
        let id = book.create(new_order(1_000_000, 0, 110_000), at(0)).id.clone();

        let order = book
            .cancel(&id, Some("Changed my mind".to_string()), at(30))
            .unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(order.payment_status, PaymentStatus::Refunded);
        assert_eq!(order.history.len(), 2);
        assert_eq!(order.history[1].description, "Changed my mind");
        assert_eq!(order.updated_at, at(30));
    }

    #[test]
    fn test_confirm_marks_paid_with_default_description() {
        let mut book = OrderBook::new();
        let id = book.create(new_order(1_000_000, 0, 110_000), at(0)).id.clone();

        let order = book.update_status(&id, OrderStatus::Confirmed, None, at(10)).unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(
            order.latest_entry().map(|e| e.description.as_str()),
            Some(OrderStatus::Confirmed.default_description())
        );
    }

    #[test]
    fn test_skipping_confirmation_still_marks_paid() {
        let mut book = OrderBook::new();
        let id = book.create(new_order(1_000_000, 0, 110_000), at(0)).id.clone();

        let shipped = book.update_status(&id, OrderStatus::Shipped, None, at(10)).unwrap();
        assert_eq!(shipped.payment_status, PaymentStatus::Paid);

        let delivered = book.update_status(&id, OrderStatus::Delivered, None, at(20)).unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);
        assert_eq!(delivered.payment_status, PaymentStatus::Paid);
        assert_eq!(delivered.history.len(), 3);
    }

    #[test]
    fn test_rejected_transition_leaves_order_alone() {
        let mut book = OrderBook::new();
        let id = book.create(new_order(1_000_000, 0, 110_000), at(0)).id.clone();
        book.update_status(&id, OrderStatus::Shipped, None, at(10)).unwrap();
        let before = book.get_by_id(&id).cloned();

        let err = book.cancel(&id, None, at(20)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidStatusTransition { .. }));

        let err = book
            .update_status(&id, OrderStatus::Confirmed, None, at(20))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidStatusTransition { .. }));
        assert_eq!(book.get_by_id(&id).cloned(), before);
    }

    #[test]
    fn test_missing_order() {
        let mut book = OrderBook::new();
        assert!(book.get_by_id("ORD-NOPE").is_none());
        let err = book
            .update_status("ORD-NOPE", OrderStatus::Confirmed, None, at(0))
            .unwrap_err();
        assert!(matches!(err, CoreError::OrderNotFound(id) if id == "ORD-NOPE"));
    }

    #[test]
    fn test_filter_by_status() {
        let mut book = OrderBook::new();
        let a = book.create(new_order(100_000, 15_000, 11_000), at(0)).id.clone();
        book.create(new_order(100_000, 15_000, 11_000), at(1));
        book.apply(OrderCommand::UpdateStatus {
            order_id: a.clone(),
            status: OrderStatus::Confirmed,
            description: None,
            at: at(2),
        })
        .unwrap();

        assert_eq!(book.filter_by_status(OrderStatus::Confirmed).len(), 1);
        assert_eq!(book.filter_by_status(OrderStatus::Processing).len(), 1);
        assert!(book.filter_by_status(OrderStatus::Delivered).is_empty());
    }

    #[test]
    fn test_order_book_serializes_as_list() {
        let mut book = OrderBook::new();
        book.create(new_order(100_000, 15_000, 11_000), at(0));

        let json = serde_json::to_string(&book).unwrap();
        assert!(json.starts_with('['));
        let back: OrderBook = serde_json::from_str(&json).unwrap();
        assert_eq!(back, book);
    }
}
