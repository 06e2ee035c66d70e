//! # Cart Commands
//!
//! Cart manipulation. None of these fail on bad quantities: the cart clamps
//! instead. The only error is naming a product that is not in the catalog.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Wizard  │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                                 │              │
//! │       │           add_to_cart                       place_order         │
//! │       │           update_cart_item                  (checkout.rs)       │
//! │       │           remove_from_cart                       │              │
//! │       │                │                                 │              │
//! │       └──── clear_cart ┴─────────────────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{AddOptions, Cart, CartItem, CartTotals};
use storefront_store::KeyValueStore;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartState, CatalogState};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    pub is_open: bool,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
            is_open: cart.is_open(),
        }
    }
}

pub async fn get_cart<S: KeyValueStore>(cart: &CartState<S>) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(cart.lock().await.cart())
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Same product, size and color already in the cart: quantity increases
/// - Otherwise: a new line with the product's current price
/// - Quantity is capped at the stock for the selection
/// - A sold-out selection leaves the cart unchanged
pub async fn add_to_cart<S: KeyValueStore>(
    catalog: &CatalogState,
    cart: &CartState<S>,
    product_id: &str,
    options: AddOptions,
) -> Result<CartResponse, ApiError> {
    debug!(
        product_id = %product_id,
        quantity = ?options.quantity,
        size = ?options.size,
        color = ?options.color,
        "add_to_cart command"
    );

    let product = catalog
        .get(product_id)
        .ok_or_else(|| ApiError::not_found("Product", product_id))?
        .clone();

    let mut store = cart.lock().await;
    Ok(CartResponse::from(store.add(product, options).await))
}

/// Sets a line's quantity. Zero or less removes the line.
pub async fn update_cart_item<S: KeyValueStore>(
    cart: &CartState<S>,
    item_id: &str,
    quantity: i64,
) -> CartResponse {
    debug!(item_id = %item_id, quantity, "update_cart_item command");
    let mut store = cart.lock().await;
    CartResponse::from(store.set_quantity(item_id, quantity).await)
}

pub async fn remove_from_cart<S: KeyValueStore>(cart: &CartState<S>, item_id: &str) -> CartResponse {
    debug!(item_id = %item_id, "remove_from_cart command");
    let mut store = cart.lock().await;
    CartResponse::from(store.remove(item_id).await)
}

pub async fn clear_cart<S: KeyValueStore>(cart: &CartState<S>) -> CartResponse {
    debug!("clear_cart command");
    let mut store = cart.lock().await;
    CartResponse::from(store.clear().await)
}

/// Opens or closes the cart drawer.
pub async fn toggle_cart<S: KeyValueStore>(cart: &CartState<S>) -> CartResponse {
    let mut store = cart.lock().await;
    CartResponse::from(store.toggle_visibility().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_store::MemoryStore;

    async fn setup() -> (CatalogState, CartState<MemoryStore>) {
        (CatalogState::mock(), CartState::load(MemoryStore::new()).await)
    }

    #[tokio::test]
    async fn test_add_same_selection_merges() {
        let (catalog, cart) = setup().await;

        add_to_cart(&catalog, &cart, "tee-basic-01", AddOptions::quantity(1).with_size("M"))
            .await
            .unwrap();
        let response = add_to_cart(&catalog, &cart, "tee-basic-01", AddOptions::quantity(2).with_size("M"))
            .await
            .unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 3);
        assert_eq!(response.totals.total_price, 297_000);
        assert_eq!(response.totals.savings, 90_000);
    }

    #[tokio::test]
    async fn test_add_clamps_to_variant_stock() {
        let (catalog, cart) = setup().await;

        let response = add_to_cart(
            &catalog,
            &cart,
            "sneaker-run-04",
            AddOptions::quantity(9).with_size("42").with_color("Grey"),
        )
        .await
        .unwrap();

        assert_eq!(response.items[0].quantity, 1);
        assert_eq!(response.items[0].max_stock, 1);
    }

    #[tokio::test]
    async fn test_sold_out_and_unknown_products() {
        let (catalog, cart) = setup().await;

        let response = add_to_cart(&catalog, &cart, "cap-logo-07", AddOptions::default())
            .await
            .unwrap();
        assert!(response.items.is_empty());

        let err = add_to_cart(&catalog, &cart, "ghost", AddOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_update_remove_and_clear() {
        let (catalog, cart) = setup().await;
        add_to_cart(&catalog, &cart, "bag-tote-05", AddOptions::quantity(2))
            .await
            .unwrap();
        let response = add_to_cart(&catalog, &cart, "watch-steel-10", AddOptions::default())
            .await
            .unwrap();
        let tote_id = response.items[0].id.clone();
        let watch_id = response.items[1].id.clone();

        let response = update_cart_item(&cart, &watch_id, 50).await;
        assert_eq!(response.items[1].quantity, 5);

        let response = update_cart_item(&cart, &watch_id, 0).await;
        assert_eq!(response.items.len(), 1);

        let response = remove_from_cart(&cart, &tote_id).await;
        assert!(response.items.is_empty());

        add_to_cart(&catalog, &cart, "bag-tote-05", AddOptions::default())
            .await
            .unwrap();
        let response = clear_cart(&cart).await;
        assert_eq!(response.totals.total_items, 0);
    }

    #[tokio::test]
    async fn test_toggle_cart() {
        let (_, cart) = setup().await;
        assert!(toggle_cart(&cart).await.is_open);
        assert!(!toggle_cart(&cart).await.is_open);
        assert!(!get_cart(&cart).await.is_open);
    }
}
