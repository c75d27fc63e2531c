use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Product categories in the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProductKind {
    Electronics,
    Grocery,
    Clothing,
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProductKind::Electronics => "Electronics",
            ProductKind::Grocery => "Grocery",
            ProductKind::Clothing => "Clothing",
        };
        f.write_str(label)
    }
}

impl FromStr for ProductKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "electronics" => Ok(ProductKind::Electronics),
            "grocery" => Ok(ProductKind::Grocery),
            "clothing" => Ok(ProductKind::Clothing),
            other => Err(CatalogError::Validation(format!(
                "unknown product kind: {other}"
            ))),
        }
    }
}

/// Category-specific fields
#[derive(Debug, Clone, PartialEq)]
pub enum ProductDetail {
    Electronics { brand: String, warranty_years: i32 },
    Grocery { expiry_date: NaiveDate },
    Clothing { size: String, material: String },
}

/// One catalog entry.
///
/// Every field except the stock level is fixed at construction; stock only
/// changes through [`Product::sell`] and [`Product::restock`], which keep it
/// non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: String,
    name: String,
    price: f64,
    quantity_in_stock: i32,
    detail: ProductDetail,
}

impl Product {
    fn new(
        id: String,
        name: String,
        price: f64,
        quantity_in_stock: i32,
        detail: ProductDetail,
    ) -> Result<Self, CatalogError> {
        if price < 0.0 {
            return Err(CatalogError::Validation(
                "price cannot be negative".to_string(),
            ));
        }
        if quantity_in_stock < 0 {
            return Err(CatalogError::Validation(
                "quantity cannot be negative".to_string(),
            ));
        }
        if let ProductDetail::Electronics { warranty_years, .. } = &detail {
            if *warranty_years < 0 {
                return Err(CatalogError::Validation(
                    "warranty years cannot be negative".to_string(),
                ));
            }
        }
        Ok(Self {
            id,
            name,
            price,
            quantity_in_stock,
            detail,
        })
    }

    pub fn electronics(
        id: String,
        name: String,
        price: f64,
        quantity_in_stock: i32,
        brand: String,
        warranty_years: i32,
    ) -> Result<Self, CatalogError> {
        Self::new(
            id,
            name,
            price,
            quantity_in_stock,
            ProductDetail::Electronics {
                brand,
                warranty_years,
            },
        )
    }

    pub fn grocery(
        id: String,
        name: String,
        price: f64,
        quantity_in_stock: i32,
        expiry_date: NaiveDate,
    ) -> Result<Self, CatalogError> {
        Self::new(
            id,
            name,
            price,
            quantity_in_stock,
            ProductDetail::Grocery { expiry_date },
        )
    }

    pub fn clothing(
        id: String,
        name: String,
        price: f64,
        quantity_in_stock: i32,
        size: String,
        material: String,
    ) -> Result<Self, CatalogError> {
        Self::new(
            id,
            name,
            price,
            quantity_in_stock,
            ProductDetail::Clothing { size, material },
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity_in_stock(&self) -> i32 {
        self.quantity_in_stock
    }

    pub fn detail(&self) -> &ProductDetail {
        &self.detail
    }

    pub fn kind(&self) -> ProductKind {
        match self.detail {
            ProductDetail::Electronics { .. } => ProductKind::Electronics,
            ProductDetail::Grocery { .. } => ProductKind::Grocery,
            ProductDetail::Clothing { .. } => ProductKind::Clothing,
        }
    }

    /// Remove `amount` units from stock. Partial sells are rejected: either
    /// the full amount is available or nothing is sold.
    pub fn sell(&mut self, amount: i32) -> Result<(), CatalogError> {
        if amount <= 0 {
            return Err(CatalogError::Validation(
                "sell amount must be positive".to_string(),
            ));
        }
        if amount > self.quantity_in_stock {
            return Err(CatalogError::Validation(format!(
                "not enough stock: requested {amount}, available {}",
                self.quantity_in_stock
            )));
        }
        self.quantity_in_stock -= amount;
        Ok(())
    }

    pub fn restock(&mut self, amount: i32) -> Result<(), CatalogError> {
        if amount <= 0 {
            return Err(CatalogError::Validation(
                "restock amount must be positive".to_string(),
            ));
        }
        self.quantity_in_stock += amount;
        Ok(())
    }

    pub fn total_value(&self) -> f64 {
        self.price * f64::from(self.quantity_in_stock)
    }

    /// Whether a grocery item is past its expiry date. `today` comes from the
    /// caller so expiry checks stay deterministic under test; non-grocery
    /// products never expire.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        match &self.detail {
            ProductDetail::Grocery { expiry_date } => today > *expiry_date,
            _ => false,
        }
    }

    /// Multi-line human-readable summary, for display only.
    pub fn describe(&self, today: NaiveDate) -> String {
        match &self.detail {
            ProductDetail::Electronics {
                brand,
                warranty_years,
            } => format!(
                "Electronics: {} (ID: {}) - ${:.2}\nBrand: {} | Warranty: {} years | Stock: {}",
                self.name, self.id, self.price, brand, warranty_years, self.quantity_in_stock
            ),
            ProductDetail::Grocery { expiry_date } => {
                let status = if self.is_expired(today) {
                    "EXPIRED"
                } else {
                    "Valid"
                };
                format!(
                    "Grocery: {} (ID: {}) - ${:.2}\nExpiry Date: {} | Status: {} | Stock: {}",
                    self.name, self.id, self.price, expiry_date, status, self.quantity_in_stock
                )
            }
            ProductDetail::Clothing { size, material } => format!(
                "Clothing: {} (ID: {}) - ${:.2}\nSize: {} | Material: {} | Stock: {}",
                self.name, self.id, self.price, size, material, self.quantity_in_stock
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> Product {
        Product::electronics(
            "E1".to_string(),
            "Phone".to_string(),
            500.0,
            10,
            "Acme".to_string(),
            2,
        )
        .unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_construction_rejects_negative_fields() {
        assert!(matches!(
            Product::clothing(
                "C1".into(),
                "Shirt".into(),
                -1.0,
                3,
                "M".into(),
                "Cotton".into()
            ),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            Product::clothing(
                "C1".into(),
                "Shirt".into(),
                9.0,
                -3,
                "M".into(),
                "Cotton".into()
            ),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            Product::electronics("E1".into(), "Phone".into(), 500.0, 10, "Acme".into(), -1),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_total_value_is_price_times_quantity() {
        assert_eq!(phone().total_value(), 5000.0);

        let empty =
            Product::grocery("G1".into(), "Milk".into(), 3.5, 0, date("2030-01-01")).unwrap();
        assert_eq!(empty.total_value(), 0.0);
    }

    #[test]
    fn test_sell_then_restock_restores_stock() {
        let mut product = phone();
        product.sell(4).unwrap();
        assert_eq!(product.quantity_in_stock(), 6);
        product.restock(4).unwrap();
        assert_eq!(product.quantity_in_stock(), 10);
    }

    #[test]
    fn test_oversell_fails_and_leaves_stock_unchanged() {
        let mut product = phone();
        assert!(matches!(product.sell(15), Err(CatalogError::Validation(_))));
        assert_eq!(product.quantity_in_stock(), 10);
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let mut product = phone();
        assert!(product.sell(0).is_err());
        assert!(product.sell(-2).is_err());
        assert!(product.restock(0).is_err());
        assert_eq!(product.quantity_in_stock(), 10);
    }

    #[test]
    fn test_expiry_is_strictly_after_date() {
        let milk =
            Product::grocery("G1".into(), "Milk".into(), 3.0, 4, date("2020-01-01")).unwrap();
        assert!(milk.is_expired(date("2024-01-01")));
        assert!(!milk.is_expired(date("2020-01-01"))); // expiry day itself is still valid
        assert!(!milk.is_expired(date("2019-12-31")));

        // Only groceries expire
        assert!(!phone().is_expired(date("2099-01-01")));
    }

    #[test]
    fn test_kind_parsing_is_case_insensitive() {
        assert_eq!(
            "electronics".parse::<ProductKind>().unwrap(),
            ProductKind::Electronics
        );
        assert_eq!(
            "Grocery".parse::<ProductKind>().unwrap(),
            ProductKind::Grocery
        );
        assert!("furniture".parse::<ProductKind>().is_err());
    }

    #[test]
    fn test_describe_flags_expired_groceries() {
        let milk =
            Product::grocery("G1".into(), "Milk".into(), 3.0, 4, date("2020-01-01")).unwrap();
        assert!(milk.describe(date("2024-01-01")).contains("EXPIRED"));
        assert!(milk.describe(date("2019-06-01")).contains("Valid"));
    }
}
