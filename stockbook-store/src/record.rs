use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use stockbook_catalog::{CatalogError, Inventory, Product, ProductDetail};

use crate::error::StoreError;

/// Flat on-disk representation of one product, tagged by category.
///
/// The field layout is the persistence contract: common fields plus the
/// category's own fields, with `type` as the discriminator. Expiry dates are
/// ISO `YYYY-MM-DD` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProductRecord {
    Electronics {
        product_id: String,
        name: String,
        price: f64,
        quantity_in_stock: i32,
        brand: String,
        warranty_years: i32,
    },
    Grocery {
        product_id: String,
        name: String,
        price: f64,
        quantity_in_stock: i32,
        expiry_date: NaiveDate,
    },
    Clothing {
        product_id: String,
        name: String,
        price: f64,
        quantity_in_stock: i32,
        size: String,
        material: String,
    },
}

impl ProductRecord {
    pub fn product_id(&self) -> &str {
        match self {
            ProductRecord::Electronics { product_id, .. }
            | ProductRecord::Grocery { product_id, .. }
            | ProductRecord::Clothing { product_id, .. } => product_id,
        }
    }

    pub fn from_product(product: &Product) -> Self {
        let product_id = product.id().to_string();
        let name = product.name().to_string();
        let price = product.price();
        let quantity_in_stock = product.quantity_in_stock();
        match product.detail() {
            ProductDetail::Electronics {
                brand,
                warranty_years,
            } => ProductRecord::Electronics {
                product_id,
                name,
                price,
                quantity_in_stock,
                brand: brand.clone(),
                warranty_years: *warranty_years,
            },
            ProductDetail::Grocery { expiry_date } => ProductRecord::Grocery {
                product_id,
                name,
                price,
                quantity_in_stock,
                expiry_date: *expiry_date,
            },
            ProductDetail::Clothing { size, material } => ProductRecord::Clothing {
                product_id,
                name,
                price,
                quantity_in_stock,
                size: size.clone(),
                material: material.clone(),
            },
        }
    }

    pub fn into_product(self) -> Result<Product, CatalogError> {
        match self {
            ProductRecord::Electronics {
                product_id,
                name,
                price,
                quantity_in_stock,
                brand,
                warranty_years,
            } => Product::electronics(product_id, name, price, quantity_in_stock, brand, warranty_years),
            ProductRecord::Grocery {
                product_id,
                name,
                price,
                quantity_in_stock,
                expiry_date,
            } => Product::grocery(product_id, name, price, quantity_in_stock, expiry_date),
            ProductRecord::Clothing {
                product_id,
                name,
                price,
                quantity_in_stock,
                size,
                material,
            } => Product::clothing(product_id, name, price, quantity_in_stock, size, material),
        }
    }
}

/// Converts the inventory into persistable records, in listing order.
pub fn to_records(inventory: &Inventory) -> Vec<ProductRecord> {
    inventory
        .list_all()
        .into_iter()
        .map(ProductRecord::from_product)
        .collect()
}

/// Loads raw records into `inventory`.
///
/// The load is atomic: every record is decoded, validated and checked for
/// duplicate ids before anything is inserted, so a bad record leaves the
/// target inventory untouched.
pub fn from_records(values: Vec<Value>, inventory: &mut Inventory) -> Result<(), StoreError> {
    let mut staged: Vec<Product> = Vec::with_capacity(values.len());
    for value in values {
        let record: ProductRecord = serde_json::from_value(value.clone())
            .map_err(|err| StoreError::InvalidData(format!("{err} in record {value}")))?;
        let product_id = record.product_id().to_string();
        let product = record.into_product().map_err(|err| {
            StoreError::InvalidData(format!("record '{product_id}': {err}"))
        })?;
        staged.push(product);
    }

    // Duplicate check up front keeps the insert loop below infallible.
    for (index, product) in staged.iter().enumerate() {
        let clashes_in_batch = staged[..index].iter().any(|other| other.id() == product.id());
        if clashes_in_batch || inventory.contains(product.id()) {
            return Err(CatalogError::DuplicateProduct(product.id().to_string()).into());
        }
    }

    for product in staged {
        inventory.add(product)?;
    }
    Ok(())
}
