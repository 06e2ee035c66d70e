//! # Mock Catalog
//!
//! The fixed product list the storefront ships with. There is no product
//! database: browsing, the cart and the wishlist all read from this list.

use chrono::{DateTime, TimeZone, Utc};
use storefront_core::{Product, SizeStock, Stock, VariantStock};

fn listed_on(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn sizes(levels: &[(&str, i64)]) -> Stock {
    Stock::BySize(
        levels
            .iter()
            .map(|(size, stock)| SizeStock {
                size: size.to_string(),
                stock: *stock,
            })
            .collect(),
    )
}

fn variants(levels: &[(&str, &str, i64)]) -> Stock {
    Stock::ByVariant(
        levels
            .iter()
            .map(|(size, color, stock)| VariantStock {
                size: Some(size.to_string()),
                color: Some(color.to_string()),
                stock: *stock,
            })
            .collect(),
    )
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    brand: &str,
    category: &str,
    price: i64,
    original_price: Option<i64>,
    stock: Stock,
    sizes: &[&str],
    colors: &[&str],
    rating: f32,
    review_count: u32,
    created_at: DateTime<Utc>,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        category: category.to_string(),
        description: None,
        price,
        original_price,
        stock,
        sizes: strings(sizes),
        colors: strings(colors),
        rating,
        review_count,
        image: format!("/images/products/{id}.jpg"),
        created_at,
    }
}

/// Every product in the store, in display order.
pub fn mock_products() -> Vec<Product> {
    vec![
        product(
            "tee-basic-01",
            "Essential Cotton Tee",
            "Kain Lokal",
            "t-shirts",
            99_000,
            Some(129_000),
            sizes(&[("S", 12), ("M", 20), ("L", 8), ("XL", 0)]),
            &["S", "M", "L", "XL"],
            &["White", "Black"],
            4.5,
            214,
            listed_on(2026, 3, 2),
        ),
        product(
            "shirt-batik-02",
            "Parang Batik Shirt",
            "Batik Nusantara",
            "shirts",
            349_000,
            None,
            sizes(&[("M", 5), ("L", 3), ("XL", 2)]),
            &["M", "L", "XL"],
            &["Indigo"],
            4.8,
            96,
            listed_on(2026, 5, 14),
        ),
        product(
            "jeans-slim-03",
            "Slim Selvedge Jeans",
            "Denim Jawa",
            "pants",
            549_000,
            Some(699_000),
            variants(&[
                ("30", "Dark Blue", 4),
                ("32", "Dark Blue", 6),
                ("32", "Black", 3),
                ("34", "Black", 0),
            ]),
            &["30", "32", "34"],
            &["Dark Blue", "Black"],
            4.4,
            58,
            listed_on(2026, 1, 20),
        ),
        product(
            "sneaker-run-04",
            "Lari Runner Sneakers",
            "Langkah",
            "shoes",
            899_000,
            Some(1_099_000),
            variants(&[
                ("40", "Grey", 2),
                ("41", "Grey", 5),
                ("42", "Grey", 1),
                ("42", "Navy Blue", 4),
                ("43", "Navy Blue", 2),
            ]),
            &["40", "41", "42", "43"],
            &["Grey", "Navy Blue"],
            4.7,
            321,
            listed_on(2026, 6, 1),
        ),
        product(
            "bag-tote-05",
            "Canvas Market Tote",
            "Kain Lokal",
            "bags",
            159_000,
            None,
            Stock::Total(40),
            &[],
            &["Natural", "Olive"],
            4.2,
            77,
            listed_on(2025, 11, 8),
        ),
        product(
            "jacket-bomber-06",
            "Nylon Bomber Jacket",
            "Urban Tropis",
            "outerwear",
            1_249_000,
            Some(1_499_000),
            sizes(&[("M", 2), ("L", 1)]),
            &["M", "L"],
            &["Army Green"],
            4.6,
            41,
            listed_on(2026, 8, 19),
        ),
        product(
            "cap-logo-07",
            "Embroidered Logo Cap",
            "Urban Tropis",
            "accessories",
            89_000,
            None,
            Stock::Total(0),
            &[],
            &["Black", "Sand"],
            3.9,
            12,
            listed_on(2025, 9, 30),
        ),
        product(
            "dress-linen-08",
            "Linen Wrap Dress",
            "Batik Nusantara",
            "dresses",
            479_000,
            Some(529_000),
            variants(&[("S", "Terracotta", 3), ("M", "Terracotta", 4), ("M", "Sage", 2)]),
            &["S", "M"],
            &["Terracotta", "Sage"],
            4.9,
            63,
            listed_on(2026, 9, 5),
        ),
        product(
            "sandal-leather-09",
            "Leather Slide Sandals",
            "Langkah",
            "shoes",
            259_000,
            None,
            sizes(&[("39", 6), ("40", 9), ("41", 7), ("42", 3)]),
            &["39", "40", "41", "42"],
            &["Brown"],
            4.1,
            88,
            listed_on(2026, 2, 11),
        ),
        product(
            "watch-steel-10",
            "Steel Field Watch",
            "Waktu",
            "accessories",
            1_850_000,
            None,
            Stock::Total(5),
            &[],
            &["Silver", "Black"],
            4.8,
            29,
            listed_on(2026, 7, 23),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let products = mock_products();
        let ids: HashSet<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_catalog_has_sold_out_and_discounted_items() {
        let products = mock_products();
        assert!(products.iter().any(|p| !p.is_in_stock()));
        assert!(products.iter().any(|p| p.discount_percent() > 0));
    }
}
