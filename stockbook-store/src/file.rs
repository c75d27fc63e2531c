use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde_json::Value;
use stockbook_catalog::Inventory;

use crate::error::StoreError;
use crate::record::{from_records, to_records};

/// Saves the inventory to `path` as a JSON array of product records.
///
/// The data is written to a temporary file in the destination directory and
/// renamed into place, so a reader never observes a truncated inventory.
pub fn save_inventory(inventory: &Inventory, path: &Path) -> Result<(), StoreError> {
    let records = to_records(inventory);
    let encoded = serde_json::to_string_pretty(&records).map_err(StoreError::Encode)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(encoded.as_bytes())?;
    tmp.persist(path).map_err(|err| StoreError::Io(err.error))?;
    Ok(())
}

/// Loads the records at `path` into `inventory`.
///
/// A missing file is the valid empty-inventory case, not an error. Content
/// that is not a JSON array surfaces as [`StoreError::InvalidData`].
pub fn load_inventory(path: &Path, inventory: &mut Inventory) -> Result<(), StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err.into()),
    };

    let values: Vec<Value> = serde_json::from_str(&contents)
        .map_err(|err| StoreError::InvalidData(format!("{}: {err}", path.display())))?;
    from_records(values, inventory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stockbook_catalog::Product;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_missing_file_loads_as_empty_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let mut inventory = Inventory::new();
        load_inventory(&dir.path().join("absent.json"), &mut inventory).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");

        let mut original = Inventory::new();
        original
            .add(
                Product::electronics(
                    "E1".to_string(),
                    "Phone".to_string(),
                    500.0,
                    10,
                    "Acme".to_string(),
                    2,
                )
                .unwrap(),
            )
            .unwrap();
        original
            .add(
                Product::grocery(
                    "G1".to_string(),
                    "Milk".to_string(),
                    3.0,
                    4,
                    date("2030-06-30"),
                )
                .unwrap(),
            )
            .unwrap();

        save_inventory(&original, &path).unwrap();

        let mut restored = Inventory::new();
        load_inventory(&path, &mut restored).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get("E1").unwrap(), original.get("E1").unwrap());
        assert_eq!(restored.get("G1").unwrap(), original.get("G1").unwrap());
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");

        let mut inventory = Inventory::new();
        save_inventory(&inventory, &path).unwrap();

        inventory
            .add(
                Product::clothing(
                    "C1".to_string(),
                    "Shirt".to_string(),
                    20.0,
                    2,
                    "M".to_string(),
                    "Cotton".to_string(),
                )
                .unwrap(),
            )
            .unwrap();
        save_inventory(&inventory, &path).unwrap();

        let mut restored = Inventory::new();
        load_inventory(&path, &mut restored).unwrap();
        assert_eq!(restored.len(), 1);
        assert!(restored.contains("C1"));
    }

    #[test]
    fn test_malformed_content_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, "not json at all").unwrap();

        let mut inventory = Inventory::new();
        assert!(matches!(
            load_inventory(&path, &mut inventory).unwrap_err(),
            StoreError::InvalidData(_)
        ));
        assert!(inventory.is_empty());
    }
}
