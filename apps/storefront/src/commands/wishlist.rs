//! Wishlist commands. Ids are checked against the catalog before they are
//! saved.

use storefront_store::KeyValueStore;
use tracing::debug;

use crate::commands::product::ProductDto;
use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState, WishlistState};

/// Saved products, in the order they were saved. Ids no longer in the
/// catalog are skipped.
pub async fn get_wishlist<S: KeyValueStore>(
    catalog: &CatalogState,
    config: &ConfigState,
    wishlist: &WishlistState<S>,
) -> Vec<ProductDto> {
    debug!("get_wishlist command");
    let store = wishlist.lock().await;
    store
        .wishlist()
        .items()
        .iter()
        .filter_map(|id| catalog.get(id))
        .map(|p| ProductDto::new(p, config))
        .collect()
}

/// Saves or un-saves a product. Returns true if it is saved afterwards.
pub async fn toggle_wishlist<S: KeyValueStore>(
    catalog: &CatalogState,
    wishlist: &WishlistState<S>,
    product_id: &str,
) -> Result<bool, ApiError> {
    if catalog.get(product_id).is_none() {
        return Err(ApiError::not_found("Product", product_id));
    }
    Ok(wishlist.lock().await.toggle(product_id).await)
}

pub async fn clear_wishlist<S: KeyValueStore>(wishlist: &WishlistState<S>) {
    debug!("clear_wishlist command");
    wishlist.lock().await.clear().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_store::MemoryStore;

    #[tokio::test]
    async fn test_toggle_and_list() {
        let catalog = CatalogState::mock();
        let config = ConfigState::default();
        let wishlist = WishlistState::load(MemoryStore::new()).await;

        assert!(toggle_wishlist(&catalog, &wishlist, "watch-steel-10").await.unwrap());
        assert!(toggle_wishlist(&catalog, &wishlist, "tee-basic-01").await.unwrap());
        assert!(!toggle_wishlist(&catalog, &wishlist, "watch-steel-10").await.unwrap());

        let saved = get_wishlist(&catalog, &config, &wishlist).await;
        let ids: Vec<_> = saved.iter().map(|p| p.product.id.as_str()).collect();
        assert_eq!(ids, vec!["tee-basic-01"]);

        clear_wishlist(&wishlist).await;
        assert!(get_wishlist(&catalog, &config, &wishlist).await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_rejected() {
        let catalog = CatalogState::mock();
        let wishlist = WishlistState::load(MemoryStore::new()).await;

        let err = toggle_wishlist(&catalog, &wishlist, "ghost").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(!wishlist.lock().await.contains("ghost"));
    }
}
