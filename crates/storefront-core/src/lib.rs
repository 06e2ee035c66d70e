//! # storefront-core: Pure Business Logic for the Storefront
//!
//! Cart, checkout wizard, order book, wishlist and catalog filtering, written
//! as pure state transitions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/storefront (commands, CLI)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        storefront-store (KeyValueStore port, persistence)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatch(command)                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌──────────┐  ┌─────────┐  ┌──────────┐         │   │
//! │  │   │  cart   │  │ checkout │  │  order  │  │ catalog  │         │   │
//! │  │   │ reducer │  │  wizard  │  │  book   │  │ filters  │         │   │
//! │  │   └─────────┘  └──────────┘  └─────────┘  └──────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK READS IN REDUCERS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Products, payment methods, order and payment statuses
//! - [`money`] - Integer money with basis-point tax math
//! - [`error`] - Domain error types
//! - [`validation`] - Shipping form and input validation
//! - [`cart`] - Cart line items and the cart reducer
//! - [`checkout`] - The three-step checkout wizard and pricing policy
//! - [`order`] - Orders, status history and the order book
//! - [`wishlist`] - Saved product ids
//! - [`catalog`] - Product filter/sort
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//! use storefront_core::types::TaxRate;
//!
//! let subtotal = Money::from_minor(1_000_000);
//! let tax = subtotal.calculate_tax(TaxRate::from_bps(1100));
//! assert_eq!(tax.amount(), 110_000);
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOptions, Cart, CartCommand, CartItem, CartTotals};
pub use catalog::{PriceRange, ProductFilter, SortBy};
pub use checkout::{
    Checkout, CheckoutCommand, CheckoutStep, OrderTotals, PricingPolicy, ShippingInfo,
    ShippingInfoPatch,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{NewOrder, Order, OrderBook, OrderCommand, OrderItem, StatusEntry};
pub use types::*;
pub use validation::FieldErrors;
pub use wishlist::Wishlist;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tax rate: 11% VAT, in basis points.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1100;

/// Flat shipping fee charged below the free-shipping threshold.
pub const DEFAULT_SHIPPING_FEE: i64 = 15_000;

/// Subtotal at or above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: i64 = 500_000;

/// Quantity used when an add request does not name one.
pub const DEFAULT_ADD_QUANTITY: i64 = 1;
