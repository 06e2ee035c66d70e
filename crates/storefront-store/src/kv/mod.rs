//! # Key-Value Persistence Port
//!
//! The durable store every snapshot is written through.
//!
//! ## Port and Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CartStore / OrderStore / WishlistStore                               │
//! │          │   get(key) / set(key, json) / remove(key)                   │
//! │          ▼                                                              │
//! │   ┌────────────────────────┐                                           │
//! │   │  trait KeyValueStore   │                                           │
//! │   └──────────┬─────────────┘                                           │
//! │              │                                                          │
//! │      ┌───────┴────────┐                                                 │
//! │      ▼                ▼                                                 │
//! │  SqliteStore     MemoryStore                                           │
//! │  (kv_store       (HashMap, tests)                                      │
//! │   table)                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are whole JSON documents, overwritten on every write. There is no
//! versioning and no transaction spanning two keys.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Storage keys.
pub mod keys {
    pub const CART: &str = "cart";
    pub const ORDERS: &str = "orders";
    pub const WISHLIST: &str = "wishlist";
}

/// A string-keyed map of JSON strings.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the key was never written or was removed.
    fn get(&self, key: &str) -> impl Future<Output = StoreResult<Option<String>>> + Send;

    /// Overwrites the value under `key`.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = StoreResult<()>> + Send;
}

/// Reads and decodes the document under `key`.
pub async fn load_json<S, T>(kv: &S, key: &str) -> StoreResult<Option<T>>
where
    S: KeyValueStore,
    T: DeserializeOwned,
{
    match kv.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::corrupt(key, &e)),
        None => Ok(None),
    }
}

/// Encodes `value` and writes it under `key`.
pub async fn save_json<S, T>(kv: &S, key: &str, value: &T) -> StoreResult<()>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    kv.set(key, &raw).await
}
