//! Saved product ids, in the order they were saved.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct Wishlist {
    product_ids: Vec<String>,
}

impl Wishlist {
    pub fn new() -> Self {
        Wishlist::default()
    }

    /// Builds a wishlist from stored ids, dropping duplicates and blanks.
    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut wishlist = Wishlist::new();
        for id in ids {
            wishlist.add(&id);
        }
        wishlist
    }

    /// Adds the id if missing, removes it if present. Returns true if the id
    /// is in the wishlist afterwards.
    pub fn toggle(&mut self, product_id: &str) -> bool {
        if self.remove(product_id) {
            false
        } else {
            self.add(product_id)
        }
    }

    /// Returns false if the id was already saved or is blank.
    pub fn add(&mut self, product_id: &str) -> bool {
        let product_id = product_id.trim();
        if product_id.is_empty() || self.contains(product_id) {
            return false;
        }
        self.product_ids.push(product_id.to_string());
        true
    }

    /// Returns false if the id was not saved.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.product_ids.len();
        self.product_ids.retain(|id| id != product_id.trim());
        self.product_ids.len() != before
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.product_ids.iter().any(|id| id == product_id.trim())
    }

    pub fn clear(&mut self) {
        self.product_ids.clear();
    }

    pub fn items(&self) -> &[String] {
        &self.product_ids
    }

    pub fn len(&self) -> usize {
        self.product_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.product_ids.is_empty()
    }
}
