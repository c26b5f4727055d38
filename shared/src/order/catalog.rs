//! Product catalog of the point of sale
//!
//! Products of the draft's branch with their available stock. The local
//! availability follows the reservation results so the picker never offers
//! units the draft already holds.

use super::DraftError;
use crate::models::{Product, StockLevel};
use serde::{Deserialize, Serialize};

/// Product with its branch availability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub product: Product,
    pub available: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    branch_id: i64,
    entries: Vec<CatalogEntry>,
}

impl ProductCatalog {
    /// Build from products and stock levels; levels of other branches are ignored
    /// and products without a level have no stock.
    pub fn new(branch_id: i64, products: Vec<Product>, levels: &[StockLevel]) -> Self {
        let entries = products
            .into_iter()
            .map(|product| {
                let available = levels
                    .iter()
                    .find(|l| l.branch_id == branch_id && l.product_id == product.id)
                    .map(|l| l.available.max(0))
                    .unwrap_or(0);
                CatalogEntry { product, available }
            })
            .collect();

        Self { branch_id, entries }
    }

    pub fn branch_id(&self) -> i64 {
        self.branch_id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, product_id: i64) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.product.id == product_id)
    }

    /// Available units, 0 for unknown products
    pub fn available(&self, product_id: i64) -> i32 {
        self.get(product_id).map(|e| e.available).unwrap_or(0)
    }

    /// Active products whose name or SKU contains `text` (case-insensitive)
    pub fn search(&self, text: &str) -> Vec<&CatalogEntry> {
        let needle = text.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.product.is_active)
            .filter(|e| {
                needle.is_empty()
                    || e.product.name.to_lowercase().contains(&needle)
                    || e.product.sku.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Check that `quantity` more units can be taken
    pub fn ensure_available(&self, product_id: i64, quantity: i32) -> Result<&Product, DraftError> {
        let entry = self
            .get(product_id)
            .ok_or(DraftError::ProductNotFound(product_id))?;
        if !entry.product.is_active {
            return Err(DraftError::InactiveProduct(product_id));
        }
        if quantity > entry.available {
            return Err(DraftError::InsufficientStock {
                product_id,
                requested: quantity,
                available: entry.available,
            });
        }
        Ok(&entry.product)
    }

    /// Units taken by a reservation
    pub fn consume(&mut self, product_id: i64, quantity: i32) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == product_id) {
            entry.available = (entry.available - quantity).max(0);
        }
    }

    /// Units given back by a release
    pub fn restore(&mut self, product_id: i64, quantity: i32) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == product_id) {
            entry.available += quantity.max(0);
        }
    }

    /// Overwrite with a fresh server level
    pub fn replace_stock(&mut self, level: StockLevel) {
        if level.branch_id != self.branch_id {
            return;
        }
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.product.id == level.product_id)
        {
            entry.available = level.available.max(0);
        }
    }
}
