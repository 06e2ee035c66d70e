//! # Commands Module
//!
//! Every operation the storefront front end can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── product.rs   ◄─── Browse, search, filter, sort
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Checkout wizard and place_order
//! ├── order.rs     ◄─── Order history and status changes
//! ├── wishlist.rs  ◄─── Saved products
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Caller (CLI today)                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  pub async fn add_to_cart(                                              │
//! │      catalog: &CatalogState,     ◄── only the states it needs          │
//! │      cart: &CartState<S>,                                               │
//! │      product_id: &str,                                                  │
//! │      options: AddOptions,                                               │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Caller receives: CartResponse  or  { code, message, fields? }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn get_product(catalog: &CatalogState, config: &ConfigState, id: &str)
//!
//! // Only needs the cart
//! async fn get_cart(cart: &CartState<S>)
//!
//! // Needs several, locked cart → checkout → orders
//! async fn place_order(config, cart, checkout, orders)
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
pub mod order;
pub mod product;
pub mod wishlist;
