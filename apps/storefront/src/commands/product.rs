//! # Product Commands
//!
//! Browsing the catalog.
//!
//! ## Browse Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductQuery { search, filter, sort }                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  browse(products, search, filter, sort)                                │
//! │    1. search          ← empty query keeps everything                   │
//! │    2. filter.matches  ← category, price, rating, size, brand, variant  │
//! │    3. sort_products                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<ProductDto>                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use storefront_core::catalog::{browse, ProductFilter, SortBy};
use storefront_core::Product;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState};

/// A product plus the derived fields a listing shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(flatten)]
    pub product: Product,
    pub discount_percent: u32,
    pub in_stock: bool,
    pub price_display: String,
}

impl ProductDto {
    pub fn new(product: &Product, config: &ConfigState) -> Self {
        ProductDto {
            product: product.clone(),
            discount_percent: product.discount_percent(),
            in_stock: product.is_in_stock(),
            price_display: config.format_currency(product.price),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub filter: ProductFilter,
    #[serde(default)]
    pub sort: SortBy,
}

/// Lists products matching the query.
pub fn list_products(
    catalog: &CatalogState,
    config: &ConfigState,
    query: &ProductQuery,
) -> Result<Vec<ProductDto>, ApiError> {
    debug!(
        search = query.search.as_deref().unwrap_or(""),
        sort = query.sort.as_str(),
        "list_products command"
    );

    let matched = browse(
        catalog.all(),
        query.search.as_deref().unwrap_or(""),
        &query.filter,
        query.sort,
    )?;

    Ok(matched.into_iter().map(|p| ProductDto::new(p, config)).collect())
}

pub fn get_product(
    catalog: &CatalogState,
    config: &ConfigState,
    product_id: &str,
) -> Result<ProductDto, ApiError> {
    debug!(product_id = %product_id, "get_product command");

    catalog
        .get(product_id)
        .map(|p| ProductDto::new(p, config))
        .ok_or_else(|| ApiError::not_found("Product", product_id))
}

/// Category names for the filter sidebar.
pub fn list_categories(catalog: &CatalogState) -> Vec<String> {
    catalog.categories().into_iter().map(str::to_string).collect()
}
