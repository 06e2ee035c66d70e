use storefront_store::{KeyValueStore, WishlistStore};
use tokio::sync::{Mutex, MutexGuard};

pub struct WishlistState<S> {
    store: Mutex<WishlistStore<S>>,
}

impl<S: KeyValueStore> WishlistState<S> {
    pub async fn load(kv: S) -> Self {
        WishlistState {
            store: Mutex::new(WishlistStore::load(kv).await),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, WishlistStore<S>> {
        self.store.lock().await
    }
}
