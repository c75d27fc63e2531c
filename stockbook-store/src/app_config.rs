use serde::Deserialize;
use std::env;

use stockbook_catalog::DEFAULT_LOW_STOCK_THRESHOLD;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Inventory file loaded at startup and written on save.
    #[serde(default = "default_inventory_file")]
    pub inventory_file: String,
    /// Stock level at or below which the low-stock report lists a product.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i32,
}

fn default_inventory_file() -> String {
    "inventory.json".to_string()
}

fn default_low_stock_threshold() -> i32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            inventory_file: default_inventory_file(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default").required(false))
            // Add in the current environment file, default to 'development'
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `STOCKBOOK_STORAGE__INVENTORY_FILE=shop.json`
            .add_source(config::Environment::with_prefix("STOCKBOOK").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_any_source() {
        let config = StorageConfig::default();
        assert_eq!(config.inventory_file, "inventory.json");
        assert_eq!(config.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
    }
}
