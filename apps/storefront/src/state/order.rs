//! Order list state. Orders are only ever appended or moved along their
//! status track, never deleted.

use storefront_store::{KeyValueStore, OrderStore};
use tokio::sync::{Mutex, MutexGuard};

pub struct OrderState<S> {
    store: Mutex<OrderStore<S>>,
}

impl<S: KeyValueStore> OrderState<S> {
    pub async fn load(kv: S) -> Self {
        OrderState {
            store: Mutex::new(OrderStore::load(kv).await),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, OrderStore<S>> {
        self.store.lock().await
    }
}
