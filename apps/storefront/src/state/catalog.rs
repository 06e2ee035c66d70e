//! Read-only product list.

use storefront_core::Product;

use crate::catalog::mock_products;

#[derive(Debug, Clone)]
pub struct CatalogState {
    products: Vec<Product>,
}

impl CatalogState {
    pub fn new(products: Vec<Product>) -> Self {
        CatalogState { products }
    }

    /// The bundled mock catalog.
    pub fn mock() -> Self {
        CatalogState::new(mock_products())
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        CatalogState::mock()
    }
}
