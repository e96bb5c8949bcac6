//! In-memory supplier store with JSON persistence.

use std::path::Path;

use crate::error::StoreError;
use crate::models::supplier::{normalize_name, NewSupplier, Supplier};

use super::{Result, SupplierStore};

/// Vector-backed store. Insertion order is kept so listings and containment
/// queries are deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    suppliers: Vec<Supplier>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records.
    pub fn from_suppliers(suppliers: Vec<Supplier>) -> Self {
        Self { suppliers }
    }

    /// Load records from a JSON file. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        let suppliers: Vec<Supplier> = serde_json::from_str(&content)?;
        Ok(Self { suppliers })
    }

    /// Write all records to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.suppliers)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Mark a supplier inactive. Its code stays reserved.
    pub fn deactivate(&mut self, code: &str) -> Result<()> {
        let supplier = self
            .suppliers
            .iter_mut()
            .find(|s| s.code == code)
            .ok_or_else(|| StoreError::NotFound(code.to_string()))?;
        supplier.active = false;
        Ok(())
    }
}

impl SupplierStore for InMemoryStore {
    fn find_active_by_name(&self, name: &str) -> Result<Option<Supplier>> {
        Ok(self
            .suppliers
            .iter()
            .find(|s| s.active && s.name == name)
            .cloned())
    }

    fn find_active_containing(&self, fragments: &[&str], limit: usize) -> Result<Vec<Supplier>> {
        Ok(self
            .suppliers
            .iter()
            .filter(|s| s.active && fragments.iter().all(|f| s.name.contains(f)))
            .take(limit)
            .cloned()
            .collect())
    }

    fn code_exists(&self, code: &str) -> Result<bool> {
        Ok(self.suppliers.iter().any(|s| s.code == code))
    }

    fn create(&mut self, supplier: NewSupplier) -> Result<Supplier> {
        if self.code_exists(&supplier.code)? {
            return Err(StoreError::DuplicateCode(supplier.code));
        }
        let name = normalize_name(&supplier.name);
        if self.find_active_by_name(&name)?.is_some() {
            return Err(StoreError::DuplicateName(name));
        }

        let record = supplier.into_supplier();
        self.suppliers.push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn new_supplier(code: &str, name: &str) -> NewSupplier {
        NewSupplier {
            code: code.to_string(),
            name: name.to_string(),
            tax_id: None,
            auto_created: true,
            origin_excerpt: String::new(),
        }
    }

    #[test]
    fn test_create_and_find() {
        let mut store = InMemoryStore::new();
        let created = store.create(new_supplier("AC01", " acme  ltda")).unwrap();

        assert_eq!(created.name, "ACME LTDA");
        assert!(created.active);
        assert_eq!(store.find_active_by_name("ACME LTDA").unwrap(), Some(created));
    }

    #[test]
    fn test_duplicate_code_rejected_even_if_inactive() {
        let mut store = InMemoryStore::new();
        store.create(new_supplier("AC01", "ACME LTDA")).unwrap();
        store.deactivate("AC01").unwrap();

        let err = store.create(new_supplier("AC01", "OTHER LTDA")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateCode(_)));
        assert!(store.code_exists("AC01").unwrap());
    }

    #[test]
    fn test_duplicate_active_name_rejected() {
        let mut store = InMemoryStore::new();
        store.create(new_supplier("AC01", "ACME LTDA")).unwrap();

        let err = store.create(new_supplier("AC02", "ACME LTDA")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(_)));
    }

    #[test]
    fn test_inactive_not_found_by_name() {
        let mut store = InMemoryStore::new();
        store.create(new_supplier("AC01", "ACME LTDA")).unwrap();
        store.deactivate("AC01").unwrap();

        assert_eq!(store.find_active_by_name("ACME LTDA").unwrap(), None);
        assert!(store.find_active_containing(&["ACME"], 10).unwrap().is_empty());
        // the name is free again
        assert!(store.create(new_supplier("AC02", "ACME LTDA")).is_ok());
    }

    #[test]
    fn test_containing_respects_limit() {
        let mut store = InMemoryStore::new();
        for i in 0..5 {
            store
                .create(new_supplier(&format!("C{i}"), &format!("ACME FILIAL {i}")))
                .unwrap();
        }
        assert_eq!(store.find_active_containing(&["ACME"], 3).unwrap().len(), 3);
    }

    #[test]
    fn test_limit_applies_after_all_fragments() {
        let mut store = InMemoryStore::new();
        for i in 0..5 {
            store
                .create(new_supplier(&format!("C{i}"), &format!("ACME FILIAL {i}")))
                .unwrap();
        }
        store.create(new_supplier("CX", "ACME COMERCIO")).unwrap();

        let found = store.find_active_containing(&["ACME", "COMERCIO"], 3).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "CX");
    }

    #[test]
    fn test_deactivate_unknown_code() {
        let mut store = InMemoryStore::new();
        assert!(matches!(store.deactivate("NOPE"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("suppliers.json");

        let mut store = InMemoryStore::new();
        store.create(new_supplier("AC01", "ACME LTDA")).unwrap();
        store.save(&path).unwrap();

        let loaded = InMemoryStore::load(&path).unwrap();
        assert_eq!(loaded.suppliers(), store.suppliers());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = InMemoryStore::load(&dir.path().join("missing.json")).unwrap();
        assert!(store.is_empty());
    }
}
