//! Wishlist store: saved product ids under the `wishlist` key.

use storefront_core::wishlist::Wishlist;
use tracing::debug;

use super::{hydrate, persist};
use crate::kv::{keys, KeyValueStore};

pub struct WishlistStore<S> {
    kv: S,
    wishlist: Wishlist,
}

impl<S: KeyValueStore> WishlistStore<S> {
    pub async fn load(kv: S) -> Self {
        let ids: Vec<String> = hydrate(&kv, keys::WISHLIST).await;
        WishlistStore {
            kv,
            wishlist: Wishlist::from_ids(ids),
        }
    }

    /// Returns true if the product is saved afterwards.
    pub async fn toggle(&mut self, product_id: &str) -> bool {
        let saved = self.wishlist.toggle(product_id);
        debug!(product_id = %product_id, saved, "Wishlist toggled");
        self.save().await;
        saved
    }

    pub async fn add(&mut self, product_id: &str) -> bool {
        let added = self.wishlist.add(product_id);
        if added {
            self.save().await;
        }
        added
    }

    pub async fn remove(&mut self, product_id: &str) -> bool {
        let removed = self.wishlist.remove(product_id);
        if removed {
            self.save().await;
        }
        removed
    }

    pub async fn clear(&mut self) {
        self.wishlist.clear();
        self.save().await;
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.wishlist.contains(product_id)
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    async fn save(&self) {
        persist(&self.kv, keys::WISHLIST, &self.wishlist).await;
    }
}
