//! # Persisted Stores
//!
//! Core reducers wrapped with hydration and snapshot writes.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  store.dispatch(command)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pure reducer (storefront-core) ──► new in-memory state                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  save_json(kv, key, snapshot)                                          │
//! │       │                                                                 │
//! │       ├── Ok  ──► done                                                 │
//! │       └── Err ──► warn!, in-memory state is kept                       │
//! │                                                                         │
//! │  Read path: load(kv) hydrates once; missing or corrupt → empty.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each store owns one key. Nothing coordinates writes across keys, so a
//! crash between two stores' writes can leave them inconsistent.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::kv::{load_json, save_json, KeyValueStore};

pub mod cart;
pub mod order;
pub mod wishlist;

/// Hydrates a snapshot, falling back to the default on a miss or any error.
async fn hydrate<S, T>(kv: &S, key: &str) -> T
where
    S: KeyValueStore,
    T: DeserializeOwned + Default,
{
    match load_json::<S, T>(kv, key).await {
        Ok(Some(value)) => {
            debug!(key = %key, "Hydrated snapshot");
            value
        }
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key = %key, error = %e, "Discarding unreadable snapshot");
            T::default()
        }
    }
}

/// Writes a snapshot. Failures are logged, never returned.
async fn persist<S, T>(kv: &S, key: &str, value: &T)
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    if let Err(e) = save_json(kv, key, value).await {
        warn!(key = %key, error = %e, "Snapshot write failed");
    }
}
