pub mod error;
pub mod inventory;
pub mod product;

pub use error::CatalogError;
pub use inventory::{Inventory, DEFAULT_LOW_STOCK_THRESHOLD};
pub use product::{Product, ProductDetail, ProductKind};
