//! Cart store: the cart reducer plus the `cart` snapshot.

use chrono::Utc;
use storefront_core::cart::{AddOptions, Cart, CartCommand, CartItem, CartTotals};
use storefront_core::types::Product;
use tracing::debug;

use super::{hydrate, persist};
use crate::kv::{keys, KeyValueStore};

pub struct CartStore<S> {
    kv: S,
    cart: Cart,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Loads the saved item list, or starts empty.
    pub async fn load(kv: S) -> Self {
        let items: Vec<CartItem> = hydrate(&kv, keys::CART).await;
        CartStore {
            kv,
            cart: Cart::from_items(items),
        }
    }

    /// Runs a command through the reducer and saves the items if they could
    /// have changed.
    pub async fn dispatch(&mut self, command: CartCommand) -> &Cart {
        let name = command.name();
        let persist_after = command.touches_items();

        self.cart = std::mem::take(&mut self.cart).apply(command);
        debug!(
            command = name,
            lines = self.cart.line_count(),
            total_items = self.cart.total_items(),
            "Cart updated"
        );

        if persist_after {
            persist(&self.kv, keys::CART, self.cart.items()).await;
        }
        &self.cart
    }

    pub async fn add(&mut self, product: Product, options: AddOptions) -> &Cart {
        self.dispatch(CartCommand::Add {
            product,
            options,
            at: Utc::now(),
        })
        .await
    }

    pub async fn remove(&mut self, item_id: &str) -> &Cart {
        self.dispatch(CartCommand::Remove {
            item_id: item_id.to_string(),
        })
        .await
    }

    pub async fn set_quantity(&mut self, item_id: &str, quantity: i64) -> &Cart {
        self.dispatch(CartCommand::SetQuantity {
            item_id: item_id.to_string(),
            quantity,
        })
        .await
    }

    pub async fn clear(&mut self) -> &Cart {
        self.dispatch(CartCommand::Clear).await
    }

    pub async fn toggle_visibility(&mut self) -> &Cart {
        self.dispatch(CartCommand::ToggleVisibility).await
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&self.cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use crate::pool::{Database, DbConfig};
    use chrono::TimeZone;
    use storefront_core::types::Stock;

    fn product(id: &str, price: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            brand: "Toko".to_string(),
            category: "shirts".to_string(),
            description: None,
            price,
            original_price: Some(price + 20_000),
            stock: Stock::Total(stock),
            sizes: vec![],
            colors: vec![],
            rating: 4.0,
            review_count: 3,
            image: String::new(),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_add_merges_and_persists() {
        let kv = MemoryStore::new();
        let mut store = CartStore::load(kv.clone()).await;

        store.add(product("p1", 100_000, 10), AddOptions::quantity(2)).await;
        store.add(product("p1", 100_000, 10), AddOptions::quantity(1)).await;

        assert_eq!(store.cart().line_count(), 1);
        assert_eq!(store.totals().total_price, 300_000);

        let reloaded = CartStore::load(kv).await;
        assert_eq!(reloaded.cart().items(), store.cart().items());
    }

    #[tokio::test]
    async fn test_clear_persists_empty_list() {
        let kv = MemoryStore::new();
        let mut store = CartStore::load(kv.clone()).await;
        store.add(product("p1", 50_000, 5), AddOptions::default()).await;
        store.clear().await;

        assert_eq!(kv.get(keys::CART).await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_visibility_is_not_persisted() {
        let kv = MemoryStore::new();
        let mut store = CartStore::load(kv.clone()).await;
        assert!(store.toggle_visibility().await.is_open());
        assert!(kv.is_empty().await);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_starts_empty() {
        let kv = MemoryStore::new();
        kv.set(keys::CART, "{broken").await.unwrap();
        let store = CartStore::load(kv).await;
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_state() {
        let kv = MemoryStore::new();
        let mut store = CartStore::load(kv.clone()).await;
        kv.set_fail_writes(true);

        store.add(product("p1", 10_000, 3), AddOptions::default()).await;
        assert_eq!(store.cart().total_items(), 1);
        assert!(kv.get(keys::CART).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sqlite_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut store = CartStore::load(db.kv()).await;
        let item_id = store
            .add(product("p9", 75_000, 4), AddOptions::quantity(9))
            .await
            .items()[0]
            .id
            .clone();
        store.set_quantity(&item_id, 2).await;

        let reloaded = CartStore::load(db.kv()).await;
        assert_eq!(reloaded.cart().total_items(), 2);
    }
}
