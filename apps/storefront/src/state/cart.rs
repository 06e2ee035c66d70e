//! # Cart State
//!
//! The persisted cart behind an async mutex.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Action               Command                 Cart change              │
//! │  ──────               ───────                 ───────────              │
//! │  Add product ───────► add_to_cart() ────────► merge or push line      │
//! │  Change quantity ───► update_cart_item() ───► clamp, or drop at 0     │
//! │  Remove ────────────► remove_from_cart() ───► drop line               │
//! │  Clear ─────────────► clear_cart() ─────────► no lines                │
//! │  Open drawer ───────► toggle_cart() ────────► is_open flips           │
//! │                                                                         │
//! │  Every command holds the lock for its whole run, snapshot included.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_store::{CartStore, KeyValueStore};
use tokio::sync::{Mutex, MutexGuard};

pub struct CartState<S> {
    store: Mutex<CartStore<S>>,
}

impl<S: KeyValueStore> CartState<S> {
    /// Hydrates the cart from `kv`.
    pub async fn load(kv: S) -> Self {
        CartState {
            store: Mutex::new(CartStore::load(kv).await),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, CartStore<S>> {
        self.store.lock().await
    }
}
