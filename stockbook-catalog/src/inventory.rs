use chrono::NaiveDate;
use std::collections::HashMap;

use crate::error::CatalogError;
use crate::product::{Product, ProductKind};

/// Stock level at or below which a product counts as low on stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

/// In-memory product collection keyed by product id.
///
/// Insertion order is tracked separately so listings and persisted output
/// stay deterministic. Invariant: every map key equals its product's id, and
/// the order list holds exactly the map's keys.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: HashMap<String, Product>,
    order: Vec<String>,
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn add(&mut self, product: Product) -> Result<(), CatalogError> {
        let id = product.id().to_string();
        if self.products.contains_key(&id) {
            return Err(CatalogError::DuplicateProduct(id));
        }
        self.order.push(id.clone());
        self.products.insert(id, product);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<(), CatalogError> {
        if self.products.remove(id).is_none() {
            return Err(CatalogError::ProductNotFound(id.to_string()));
        }
        self.order.retain(|entry| entry != id);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&Product, CatalogError> {
        self.products
            .get(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Product, CatalogError> {
        self.products
            .get_mut(id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.products.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products, in insertion order.
    pub fn list_all(&self) -> Vec<&Product> {
        self.order.iter().map(|id| &self.products[id]).collect()
    }

    /// Case-insensitive substring match against product names.
    pub fn search_by_name(&self, needle: &str) -> Vec<&Product> {
        let needle = needle.to_lowercase();
        self.list_all()
            .into_iter()
            .filter(|product| product.name().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn search_by_kind(&self, kind: ProductKind) -> Vec<&Product> {
        self.list_all()
            .into_iter()
            .filter(|product| product.kind() == kind)
            .collect()
    }

    /// Sell `quantity` units of the given product. Lookup failures propagate
    /// as [`CatalogError::ProductNotFound`]; stock failures are wrapped so
    /// the error names the product.
    pub fn sell(&mut self, id: &str, quantity: i32) -> Result<(), CatalogError> {
        let product = self.get_mut(id)?;
        product.sell(quantity).map_err(|source| CatalogError::Stock {
            product_id: id.to_string(),
            source: Box::new(source),
        })
    }

    pub fn restock(&mut self, id: &str, quantity: i32) -> Result<(), CatalogError> {
        let product = self.get_mut(id)?;
        product
            .restock(quantity)
            .map_err(|source| CatalogError::Stock {
                product_id: id.to_string(),
                source: Box::new(source),
            })
    }

    pub fn total_value(&self) -> f64 {
        self.products.values().map(Product::total_value).sum()
    }

    /// Removes every grocery item expired as of `today` and returns the
    /// removed ids in insertion order. The expired set is computed up front,
    /// so the sweep is all-or-nothing from the caller's point of view.
    pub fn remove_expired(&mut self, today: NaiveDate) -> Vec<String> {
        let expired: Vec<String> = self
            .order
            .iter()
            .filter(|id| self.products[id.as_str()].is_expired(today))
            .cloned()
            .collect();
        for id in &expired {
            self.products.remove(id);
        }
        self.order.retain(|id| self.products.contains_key(id));
        expired
    }

    /// Products with stock at or below `threshold`, in insertion order.
    pub fn low_stock(&self, threshold: i32) -> Vec<&Product> {
        self.list_all()
            .into_iter()
            .filter(|product| product.quantity_in_stock() <= threshold)
            .collect()
    }
}
