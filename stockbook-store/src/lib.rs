pub mod app_config;
pub mod error;
pub mod file;
pub mod record;

pub use app_config::Config;
pub use error::StoreError;
pub use file::{load_inventory, save_inventory};
pub use record::{from_records, to_records, ProductRecord};
