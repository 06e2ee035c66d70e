//! # Catalog Filtering
//!
//! Filter, sort and search over a product slice.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  &[Product] ──► filter_products(filter) ──► sort_products(sort) ──► Vec │
//! │                                                                         │
//! │  Every criterion left unset matches everything. Set criteria are ANDed. │
//! │  Within a set criterion (categories, sizes) any listed value matches.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no index: each call scans the whole slice.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::Product;

/// Longest accepted search query, in characters.
pub const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// Price Range
// =============================================================================

/// Price brackets offered by the filter sidebar, plus a custom range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    /// Below 100 000.
    Under100k,
    /// 100 000 up to 500 000.
    From100kTo500k,
    /// 500 000 up to 1 000 000.
    From500kTo1m,
    /// Above 1 000 000.
    Over1m,
    /// Inclusive bounds; either side may be open.
    Custom { min: Option<i64>, max: Option<i64> },
}

impl PriceRange {
    pub fn contains(&self, price: i64) -> bool {
        match *self {
            PriceRange::Under100k => price < 100_000,
            PriceRange::From100kTo500k => (100_000..=500_000).contains(&price),
            PriceRange::From500kTo1m => price > 500_000 && price <= 1_000_000,
            PriceRange::Over1m => price > 1_000_000,
            PriceRange::Custom { min, max } => {
                min.map_or(true, |min| price >= min) && max.map_or(true, |max| price <= max)
            }
        }
    }
}

impl FromStr for PriceRange {
    type Err = ValidationError;

    /// Accepts a bracket name or `min-max` with either side optional
    /// (`100000-`, `-250000`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "under_100k" => return Ok(PriceRange::Under100k),
            "100k_500k" | "from_100k_to_500k" => return Ok(PriceRange::From100kTo500k),
            "500k_1m" | "from_500k_to_1m" => return Ok(PriceRange::From500kTo1m),
            "over_1m" => return Ok(PriceRange::Over1m),
            _ => {}
        }

        let invalid = || ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "expected a bracket name or min-max".to_string(),
        };

        let (min, max) = s.split_once('-').ok_or_else(invalid)?;
        let bound = |v: &str| -> Result<Option<i64>, ValidationError> {
            let v = v.trim();
            if v.is_empty() {
                Ok(None)
            } else {
                v.parse().map(Some).map_err(|_| invalid())
            }
        };

        Ok(PriceRange::Custom {
            min: bound(min)?,
            max: bound(max)?,
        })
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Filter sidebar selections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    /// Matches any of these categories (case-insensitive).
    pub categories: Vec<String>,
    pub price: Option<PriceRange>,
    /// Minimum average rating, e.g. 4.0 for "4 stars & up".
    pub min_rating: Option<f32>,
    /// Matches products offering any of these sizes.
    pub sizes: Vec<String>,
    /// Case-insensitive substring of the brand.
    pub brand: Option<String>,
    /// Case-insensitive substring of any offered color.
    pub variant: Option<String>,
    pub in_stock_only: bool,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        *self == ProductFilter::default()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if !self.categories.is_empty()
            && !self
                .categories
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&product.category))
        {
            return false;
        }

        if let Some(range) = &self.price {
            if !range.contains(product.price) {
                return false;
            }
        }

        if let Some(min) = self.min_rating {
            if product.rating < min {
                return false;
            }
        }

        if !self.sizes.is_empty()
            && !product
                .sizes
                .iter()
                .any(|s| self.sizes.iter().any(|want| want.eq_ignore_ascii_case(s)))
        {
            return false;
        }

        if let Some(brand) = non_blank(self.brand.as_deref()) {
            if !contains_ignore_case(&product.brand, brand) {
                return false;
            }
        }

        if let Some(variant) = non_blank(self.variant.as_deref()) {
            if !product.colors.iter().any(|c| contains_ignore_case(c, variant)) {
                return false;
            }
        }

        !self.in_stock_only || product.is_in_stock()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn filter_products<'a>(products: &'a [Product], filter: &ProductFilter) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}

// =============================================================================
// Sort
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Name,
    PriceAsc,
    PriceDesc,
    /// Highest rated first; more reviews breaks ties.
    Rating,
    #[default]
    Newest,
}

impl SortBy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::PriceAsc => "price_asc",
            SortBy::PriceDesc => "price_desc",
            SortBy::Rating => "rating",
            SortBy::Newest => "newest",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortBy::PriceAsc => a.price.cmp(&b.price),
            SortBy::PriceDesc => b.price.cmp(&a.price),
            SortBy::Rating => b
                .rating
                .total_cmp(&a.rating)
                .then_with(|| b.review_count.cmp(&a.review_count)),
            SortBy::Newest => b.created_at.cmp(&a.created_at),
        }
    }
}

impl FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [SortBy; 5] = [
            SortBy::Name,
            SortBy::PriceAsc,
            SortBy::PriceDesc,
            SortBy::Rating,
            SortBy::Newest,
        ];
        ALL.into_iter()
            .find(|sort| sort.as_str() == s.trim())
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: ALL.iter().map(|s| s.as_str().to_string()).collect(),
            })
    }
}

/// Stable sort, so equal keys keep catalog order.
pub fn sort_products(products: &mut [&Product], sort: SortBy) {
    products.sort_by(|a, b| sort.compare(a, b));
}

// =============================================================================
// Search
// =============================================================================

/// Case-insensitive substring search over name, brand and category.
///
/// An empty query returns every product. Queries longer than
/// [`MAX_QUERY_LEN`] characters are rejected.
pub fn search<'a>(products: &'a [Product], query: &str) -> Result<Vec<&'a Product>, ValidationError> {
    let query = query.trim();
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::OutOfRange {
            field: "query".to_string(),
            min: 0,
            max: MAX_QUERY_LEN as i64,
        });
    }

    let needle = query.to_lowercase();
    Ok(products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.brand.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        })
        .collect())
}

/// Search, filter, then sort in one call. An empty query keeps everything.
pub fn browse<'a>(
    products: &'a [Product],
    query: &str,
    filter: &ProductFilter,
    sort: SortBy,
) -> Result<Vec<&'a Product>, ValidationError> {
    let mut matched: Vec<&Product> = search(products, query)?
        .into_iter()
        .filter(|p| filter.matches(p))
        .collect();
    sort_products(&mut matched, sort);
    Ok(matched)
}

// =============================================================================
// Unit Tests
// =============================================================================
