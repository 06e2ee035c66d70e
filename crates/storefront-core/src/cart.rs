//! # Cart
//!
//! The shopping cart as a pure state machine.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Commands                                        │
//! │                                                                         │
//! │  UI Action               CartCommand             Effect on items        │
//! │  ─────────               ───────────             ───────────────        │
//! │  Add to cart ──────────► Add ──────────────────► merge or push         │
//! │  Change quantity ──────► SetQuantity ──────────► clamp / remove        │
//! │  Click remove ─────────► Remove ───────────────► retain                │
//! │  Empty cart ───────────► Clear ────────────────► items.clear()         │
//! │  Cart icon ────────────► ToggleVisibility ─────► (none, UI flag only)  │
//! │                                                                         │
//! │  Cart::apply(command) -> Cart     no errors, no I/O, no clock reads    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - A line is identified by product id + size + color; adding the same
//!   selection again increases that line's quantity.
//! - Every line's quantity is in `[1, max_stock]`.
//! - Invalid input is clamped, never rejected. Unknown item ids are no-ops.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;
use crate::DEFAULT_ADD_QUANTITY;

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
///
/// Product data is frozen when the line is created, so the cart keeps showing
/// the price the customer saw even if the catalog changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// `{product_id}-{size}-{color}-{created_ms}`.
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub price: i64,
    pub original_price: Option<i64>,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Stock available for this selection when last added.
    pub max_stock: i64,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    fn from_product(
        product: &Product,
        size: Option<String>,
        color: Option<String>,
        quantity: i64,
        max_stock: i64,
        at: DateTime<Utc>,
    ) -> Self {
        let id = format!(
            "{}-{}-{}-{}",
            product.id,
            size.as_deref().unwrap_or("default"),
            color.as_deref().unwrap_or("default"),
            at.timestamp_millis()
        );

        CartItem {
            id,
            product_id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            image: product.image.clone(),
            price: product.price,
            original_price: product.original_price,
            quantity,
            size,
            color,
            max_stock,
            added_at: at,
        }
    }

    /// True when this line holds the same product and variant selection.
    pub fn matches(&self, product_id: &str, size: Option<&str>, color: Option<&str>) -> bool {
        self.product_id == product_id && self.size.as_deref() == size && self.color.as_deref() == color
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_minor(self.price)
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Original unit price × quantity (selling price if there is no original).
    pub fn line_original_total(&self) -> Money {
        Money::from_minor(self.original_price.unwrap_or(self.price)).multiply_quantity(self.quantity)
    }

    fn clamp_quantity(&self, requested: i64) -> i64 {
        requested.min(self.max_stock).max(1)
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Options for adding a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddOptions {
    /// Defaults to 1. Values below 1 are treated as 1.
    pub quantity: Option<i64>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl AddOptions {
    pub fn quantity(quantity: i64) -> Self {
        AddOptions {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Everything that can happen to a cart.
#[derive(Debug, Clone)]
pub enum CartCommand {
    Add {
        product: Product,
        options: AddOptions,
        at: DateTime<Utc>,
    },
    Remove {
        item_id: String,
    },
    SetQuantity {
        item_id: String,
        quantity: i64,
    },
    Clear,
    ToggleVisibility,
    Open,
    Close,
}

impl CartCommand {
    /// True if the command can change the line items (and so must be
    /// persisted).
    pub fn touches_items(&self) -> bool {
        !matches!(
            self,
            CartCommand::ToggleVisibility | CartCommand::Open | CartCommand::Close
        )
    }

    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::Add { .. } => "add",
            CartCommand::Remove { .. } => "remove",
            CartCommand::SetQuantity { .. } => "set_quantity",
            CartCommand::Clear => "clear",
            CartCommand::ToggleVisibility => "toggle_visibility",
            CartCommand::Open => "open",
            CartCommand::Close => "close",
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
    /// Drawer visibility. Never persisted.
    #[serde(skip)]
    is_open: bool,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from a persisted item list.
    ///
    /// Lines that no longer satisfy the quantity invariant are repaired:
    /// quantities are clamped to their stock and empty lines dropped.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let items = items
            .into_iter()
            .filter(|item| item.quantity > 0 && item.max_stock > 0)
            .map(|mut item| {
                item.quantity = item.clamp_quantity(item.quantity);
                item
            })
            .collect();

        Cart {
            items,
            is_open: false,
        }
    }

    /// Applies a command and returns the next cart.
    pub fn apply(mut self, command: CartCommand) -> Self {
        match command {
            CartCommand::Add { product, options, at } => self.add(&product, options, at),
            CartCommand::Remove { item_id } => self.items.retain(|i| i.id != item_id),
            CartCommand::SetQuantity { item_id, quantity } => {
                self.set_quantity(&item_id, quantity)
            }
            CartCommand::Clear => self.items.clear(),
            CartCommand::ToggleVisibility => self.is_open = !self.is_open,
            CartCommand::Open => self.is_open = true,
            CartCommand::Close => self.is_open = false,
        }
        self
    }

    fn add(&mut self, product: &Product, options: AddOptions, at: DateTime<Utc>) {
        let AddOptions {
            quantity,
            size,
            color,
        } = options;

        let stock = product.available_stock(size.as_deref(), color.as_deref());
        if stock <= 0 {
            return;
        }

        let requested = quantity.unwrap_or(DEFAULT_ADD_QUANTITY).max(1);

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.matches(&product.id, size.as_deref(), color.as_deref()))
        {
            item.max_stock = stock;
            item.quantity = item.clamp_quantity(item.quantity.saturating_add(requested));
            return;
        }

        self.items.push(CartItem::from_product(
            product,
            size,
            color,
            requested.min(stock),
            stock,
            at,
        ));
    }

    fn set_quantity(&mut self, item_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.items.retain(|i| i.id != item_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) {
            item.quantity = item.clamp_quantity(quantity);
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities (the badge on the cart icon).
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn total_original_price(&self) -> Money {
        self.items.iter().map(CartItem::line_original_total).sum()
    }

    /// Original total minus selling total.
    pub fn savings(&self) -> Money {
        self.total_original_price() - self.total_price()
    }
}

/// Derived cart numbers for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_items: i64,
    pub total_price: i64,
    pub total_original_price: i64,
    pub savings: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_items: cart.total_items(),
            total_price: cart.total_price().amount(),
            total_original_price: cart.total_original_price().amount(),
            savings: cart.savings().amount(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
