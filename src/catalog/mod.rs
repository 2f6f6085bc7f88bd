//! Read-only reference catalogs - building, object and vehicle types
//!
//! Catalogs map a string id to type metadata. The grid never stores this
//! metadata; cells only hold opaque building and object ids, and callers
//! resolve types here when they need sizes, categories or level caps.

pub mod building;
pub mod object;
pub mod vehicle;

pub use building::{BuildingCategory, BuildingType};
pub use object::{ObjectCategory, ObjectType};
pub use vehicle::{VehiclePurpose, VehicleType};

use ahash::AHashMap;
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when building or loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing [[{0}]] entries")]
    MissingTable(&'static str),

    #[error("Duplicate catalog id: {0}")]
    DuplicateId(String),

    #[error("Invalid entry {id}: {reason}")]
    InvalidEntry { id: String, reason: String },
}

/// A type that can live in a [`Catalog`]
pub trait CatalogEntry: DeserializeOwned {
    /// Name of the TOML array of tables holding entries, e.g. `building`
    const TABLE: &'static str;

    fn id(&self) -> &str;

    /// Check entry-level invariants, returning the reason on failure
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Built-in entries shipped with the game
    fn defaults() -> Vec<Self>;
}

/// Id-indexed registry preserving insertion order
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    entries: Vec<T>,
    by_id: AHashMap<String, usize>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            by_id: AHashMap::new(),
        }
    }
}

impl<T: CatalogEntry> Catalog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the built-in entries
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for entry in T::defaults() {
            if let Err(e) = catalog.insert(entry) {
                tracing::warn!("Skipping built-in {} entry: {}", T::TABLE, e);
            }
        }
        catalog
    }

    /// Add an entry; ids must be unique and entries valid
    pub fn insert(&mut self, entry: T) -> Result<(), CatalogError> {
        if let Err(reason) = entry.validate() {
            return Err(CatalogError::InvalidEntry {
                id: entry.id().to_owned(),
                reason,
            });
        }
        if self.by_id.contains_key(entry.id()) {
            return Err(CatalogError::DuplicateId(entry.id().to_owned()));
        }

        self.by_id.insert(entry.id().to_owned(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load entries from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse entries from the `[[T::TABLE]]` array of a TOML document
    pub fn parse_toml(content: &str) -> Result<Self, CatalogError> {
        let mut document: toml::Table = toml::from_str(content)?;
        let value = document
            .remove(T::TABLE)
            .ok_or(CatalogError::MissingTable(T::TABLE))?;
        let entries: Vec<T> = value.try_into()?;

        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry)?;
        }
        tracing::info!("Loaded {} {} types", catalog.len(), T::TABLE);
        Ok(catalog)
    }
}

/// Shared size check for catalog entries
pub(crate) fn validate_size(size: &[f32; 3]) -> Result<(), String> {
    if size.iter().all(|s| s.is_finite() && *s > 0.0) {
        Ok(())
    } else {
        Err(format!("size components must be positive, got {:?}", size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_sizes() {
        assert_eq!(Catalog::<BuildingType>::with_defaults().len(), 6);
        assert_eq!(Catalog::<ObjectType>::with_defaults().len(), 7);
        assert_eq!(Catalog::<VehicleType>::with_defaults().len(), 4);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut catalog = Catalog::<BuildingType>::with_defaults();
        let copy = catalog.get("basic_hive").unwrap().clone();
        match catalog.insert(copy) {
            Err(CatalogError::DuplicateId(id)) => assert_eq!(id, "basic_hive"),
            other => panic!("expected duplicate id, got {:?}", other),
        }
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let catalog = Catalog::<VehicleType>::with_defaults();
        let ids: Vec<&str> = catalog.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["honey_truck", "cargo_drone", "maintenance_bot", "honey_collector"]
        );
    }

    #[test]
    fn test_parse_toml_missing_table() {
        let result = Catalog::<VehicleType>::parse_toml("[[building]]\nid = \"x\"\n");
        assert!(matches!(result, Err(CatalogError::MissingTable("vehicle"))));
    }

    #[test]
    fn test_parse_toml_bad_entry_shape() {
        let toml_str = r#"
            [[object]]
            id = "bee"
        "#;
        assert!(matches!(
            Catalog::<ObjectType>::parse_toml(toml_str),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_size() {
        assert!(validate_size(&[1.0, 0.5, 2.0]).is_ok());
        assert!(validate_size(&[1.0, 0.0, 2.0]).is_err());
        assert!(validate_size(&[f32::NAN, 1.0, 1.0]).is_err());
    }
}
