//! # State Module
//!
//! One state type per concern. Commands take only the states they touch.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ CartState<S> │ │OrderState<S> │ │WishlistState │ │CheckoutState │   │
//! │  │ Mutex<       │ │ Mutex<       │ │ <S>          │ │ Mutex<       │   │
//! │  │  CartStore>  │ │  OrderStore> │ │              │ │  Checkout>   │   │
//! │  └──────┬───────┘ └──────┬───────┘ └──────┬───────┘ └──────────────┘   │
//! │         └────────────────┼────────────────┘        (memory only)       │
//! │                          ▼                                              │
//! │                 S: KeyValueStore  (SqliteStore from DbState)           │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐                                     │
//! │  │ CatalogState │ │ ConfigState  │   read-only after startup           │
//! │  └──────────────┘ └──────────────┘                                     │
//! │                                                                         │
//! │  LOCK ORDER when a command needs several: cart → checkout → orders.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod checkout;
mod config;
mod db;
mod order;
mod wishlist;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use checkout::CheckoutState;
pub use config::ConfigState;
pub use db::DbState;
pub use order::OrderState;
pub use wishlist::WishlistState;
