//! # Domain Types
//!
//! Reference data and enums shared by the cart, checkout and order modules.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  OrderStatus    │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  Processing     │   │  CreditCard     │       │
//! │  │  price          │   │  Confirmed      │   │  EWallet        │       │
//! │  │  original_price │   │  Shipped        │   │  BankTransfer   │       │
//! │  │  stock ─────────┼─┐ │  Delivered      │   └─────────────────┘       │
//! │  └─────────────────┘ │ │  Cancelled      │                              │
//! │                      │ └─────────────────┘   ┌─────────────────┐       │
//! │  ┌─────────────────┐ │                       │ PaymentStatus   │       │
//! │  │     Stock       │◄┘                       │  Pending/Paid/  │       │
//! │  │ Total | BySize  │                         │  Refunded       │       │
//! │  │ | ByVariant     │                         └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are read-only here: the cart and orders keep their own snapshots.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points (1100 = 11%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage, e.g. `11.0`.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Percentage for display only.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Stock for one size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SizeStock {
    pub size: String,
    pub stock: i64,
}

/// Stock for one size/color combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantStock {
    pub size: Option<String>,
    pub color: Option<String>,
    pub stock: i64,
}

/// How a product tracks its inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Stock {
    /// One number for the whole product.
    Total(i64),
    /// Per-size stock list.
    BySize(Vec<SizeStock>),
    /// Per-variant stock list.
    ByVariant(Vec<VariantStock>),
}

impl Stock {
    /// Resolves the stock available for a size/color selection.
    ///
    /// ## Rules
    /// - `Total`: the selection is ignored
    /// - `BySize`: the named size's stock, or the sum of all sizes when no
    ///   size is selected
    /// - `ByVariant`: the sum of every variant matching the selected fields
    ///
    /// An unmatched selection resolves to 0. Negative stock is reported as 0.
    pub fn available(&self, size: Option<&str>, color: Option<&str>) -> i64 {
        let raw = match self {
            Stock::Total(n) => *n,
            Stock::BySize(levels) => match size {
                Some(size) => levels
                    .iter()
                    .find(|l| l.size == size)
                    .map(|l| l.stock)
                    .unwrap_or(0),
                None => levels.iter().map(|l| l.stock.max(0)).sum(),
            },
            Stock::ByVariant(variants) => variants
                .iter()
                .filter(|v| size.map_or(true, |s| v.size.as_deref() == Some(s)))
                .filter(|v| color.map_or(true, |c| v.color.as_deref() == Some(c)))
                .map(|v| v.stock.max(0))
                .sum(),
        };
        raw.max(0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: Option<String>,

    /// Selling price in minor units.
    pub price: i64,

    /// Pre-discount price, shown struck through when present.
    pub original_price: Option<i64>,

    pub stock: Stock,

    /// Sizes offered (may be empty).
    pub sizes: Vec<String>,

    /// Colors offered (may be empty).
    pub colors: Vec<String>,

    /// Average star rating, 0.0 to 5.0.
    pub rating: f32,

    pub review_count: u32,

    /// Image reference (path or URL), never loaded here.
    pub image: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_minor(self.price)
    }

    /// Original price, falling back to the selling price.
    #[inline]
    pub fn original_price(&self) -> Money {
        Money::from_minor(self.original_price.unwrap_or(self.price))
    }

    /// Stock for a size/color selection. See [`Stock::available`].
    #[inline]
    pub fn available_stock(&self, size: Option<&str>, color: Option<&str>) -> i64 {
        self.stock.available(size, color)
    }

    /// Whole-percent discount against the original price (0 if none).
    pub fn discount_percent(&self) -> u32 {
        self.price().discount_percent_from(self.original_price())
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock.available(None, None) > 0
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// Payment methods offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    EWallet,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::EWallet,
        PaymentMethod::BankTransfer,
    ];

    /// Stable identifier, matching the serialized form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::EWallet => "e_wallet",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }

    /// Label shown on the review step.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::EWallet => "E-Wallet",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "paymentMethod".to_string(),
                allowed: PaymentMethod::ALL.iter().map(|m| m.as_str().to_string()).collect(),
            })
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of an order.
///
/// ```text
/// processing ──► confirmed ──► shipped ──► delivered
///     │
///     └────────► cancelled
/// ```
///
/// Forward moves may skip steps. Cancellation is only reachable from
/// `Processing`. `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Processing,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Processing,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Position on the fulfilment track. `None` for the cancellation branch.
    const fn rank(&self) -> Option<u8> {
        match self {
            OrderStatus::Processing => Some(0),
            OrderStatus::Confirmed => Some(1),
            OrderStatus::Shipped => Some(2),
            OrderStatus::Delivered => Some(3),
            OrderStatus::Cancelled => None,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Returns true if moving from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (OrderStatus::Processing, OrderStatus::Cancelled) => true,
            (_, OrderStatus::Cancelled) => false,
            (current, next) => match (current.rank(), next.rank()) {
                (Some(from), Some(to)) => to > from,
                _ => false,
            },
        }
    }

    /// History text used when a status change carries no description.
    pub const fn default_description(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Order placed and awaiting confirmation",
            OrderStatus::Confirmed => "Payment confirmed, order is being prepared",
            OrderStatus::Shipped => "Order handed to the courier",
            OrderStatus::Delivered => "Order delivered to the customer",
            OrderStatus::Cancelled => "Order cancelled",
        }
    }

    /// Payment status after moving to `self` from an order whose payment
    /// is `current`.
    ///
    /// Reaching or passing `Confirmed` settles a pending payment, so a
    /// skipped confirmation still ends paid. Cancelling refunds.
    pub const fn payment_after(&self, current: PaymentStatus) -> PaymentStatus {
        match (self, current) {
            (OrderStatus::Cancelled, _) => PaymentStatus::Refunded,
            (OrderStatus::Confirmed | OrderStatus::Shipped | OrderStatus::Delivered, PaymentStatus::Pending) => {
                PaymentStatus::Paid
            }
            (_, current) => current,
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s.trim())
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL.iter().map(|st| st.as_str().to_string()).collect(),
            })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Payment state derived from the order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

// =============================================================================
// Unit Tests
// =============================================================================
