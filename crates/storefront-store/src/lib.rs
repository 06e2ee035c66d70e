//! # storefront-store: Persistence for the Storefront
//!
//! The key-value persistence port, its SQLite and in-memory backends, and
//! the stores that hydrate from and snapshot into it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  apps/storefront (commands)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  Repositories │    │ KeyValueStore │    │   Database   │  │   │
//! │  │   │               │    │               │    │   (pool.rs)  │  │   │
//! │  │   │ CartStore     │───►│ SqliteStore   │───►│ SqlitePool   │  │   │
//! │  │   │ OrderStore    │    │ MemoryStore   │    │ migrations   │  │   │
//! │  │   │ WishlistStore │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  storefront.db  (kv_store: cart, orders, wishlist)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_store::{CartStore, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("storefront.db")).await?;
//! let mut cart = CartStore::load(db.kv()).await;
//! cart.add(product, AddOptions::quantity(2)).await;
//! ```

pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use kv::{KeyValueStore, MemoryStore, SqliteStore};
pub use pool::{Database, DbConfig};
pub use repository::cart::CartStore;
pub use repository::order::OrderStore;
pub use repository::wishlist::WishlistStore;
