//! Append-only CSV product store.
//!
//! One file, one header row, one row per submitted product in insertion
//! order. Records are never updated or deleted.

use crate::error::StoreError;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_LOCATION: &str = "Not specified";
const PLACEHOLDER_IMAGE: &str = "placeholder.png";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A persisted product row. Field names map to the CSV header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Date_Added")]
    pub date_added: String,
}

/// Caller-supplied fields for a new product. Optional fields get defaults
/// at write time; the timestamp is always generated server-side.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub image: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub description: String,
    pub price: String,
}

pub struct ProductStore {
    path: PathBuf,
}

impl ProductStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file with its header row if it does not exist.
    /// Idempotent; never touches an existing file.
    pub fn initialize(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record([
            "Image",
            "Name",
            "Category",
            "Location",
            "Description",
            "Price",
            "Date_Added",
        ])?;
        let header = wtr
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        std::fs::write(&self.path, header)?;
        tracing::info!("created product file at {}", self.path.display());
        Ok(())
    }

    /// Append one validated product row and return the full record as
    /// persisted. The row is flushed and synced before returning.
    pub fn append(&self, new: NewProduct) -> Result<Product, StoreError> {
        for (value, field) in [
            (&new.name, "name"),
            (&new.description, "description"),
            (&new.price, "price"),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::MissingField { field });
            }
        }

        self.initialize()?;

        let record = Product {
            image: new.image.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            name: new.name,
            category: new.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            location: new.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            description: new.description,
            price: new.price,
            date_added: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        };

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        wtr.serialize(&record)?;
        let row = wtr
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(&row)?;
        file.sync_all()?;

        tracing::debug!("appended product '{}'", record.name);
        Ok(record)
    }

    /// All records in file order. A store that was never written to is an
    /// empty list, not an error.
    pub fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::Reader::from_path(&self.path)?;
        let mut products = Vec::new();
        for result in rdr.deserialize() {
            products.push(result?);
        }
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn temp_store() -> (tempfile::TempDir, ProductStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ProductStore::new(dir.path().join("products.csv"));
        (dir, store)
    }

    fn clay_pot() -> NewProduct {
        NewProduct {
            name: "Clay Pot".to_string(),
            description: "Handmade terracotta pot".to_string(),
            price: "450".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_list_all_on_fresh_store_is_empty() {
        let (_dir, store) = temp_store();
        assert_eq!(store.list_all().unwrap(), Vec::new());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (_dir, store) = temp_store();
        store.initialize().unwrap();
        let first = std::fs::read_to_string(store.path()).unwrap();
        store.initialize().unwrap();
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), first);
        assert!(first.starts_with("Image,Name,Category,Location,Description,Price,Date_Added"));
    }

    #[test]
    fn test_append_then_list_roundtrips_with_defaults() {
        let (_dir, store) = temp_store();
        let written = store.append(clay_pot()).unwrap();

        let products = store.list_all().unwrap();
        assert_eq!(products.len(), 1);
        let got = &products[0];
        assert_eq!(got, &written);
        assert_eq!(got.name, "Clay Pot");
        assert_eq!(got.description, "Handmade terracotta pot");
        assert_eq!(got.price, "450");
        assert_eq!(got.category, DEFAULT_CATEGORY);
        assert_eq!(got.location, DEFAULT_LOCATION);
        assert!(!got.date_added.is_empty());
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let (_dir, store) = temp_store();
        for name in ["first", "second", "third"] {
            let mut p = clay_pot();
            p.name = name.to_string();
            store.append(p).unwrap();
        }
        let names: Vec<String> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_append_rejects_empty_required_fields() {
        let (_dir, store) = temp_store();
        let mut p = clay_pot();
        p.price = "  ".to_string();
        match store.append(p) {
            Err(StoreError::MissingField { field }) => assert_eq!(field, "price"),
            other => panic!("expected MissingField, got {:?}", other.map(|p| p.name)),
        }
        // Rejected writes must not create rows.
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_commas_in_description_survive_roundtrip() {
        let (_dir, store) = temp_store();
        let mut p = clay_pot();
        p.description = "Terracotta, hand-thrown, sun-dried".to_string();
        store.append(p).unwrap();
        let products = store.list_all().unwrap();
        assert_eq!(products[0].description, "Terracotta, hand-thrown, sun-dried");
    }
}
