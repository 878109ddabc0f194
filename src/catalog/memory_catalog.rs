use std::{fs, path::Path, sync::{Arc, RwLock}};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{BaseColumn, CatalogEntry, CatalogError, CatalogProvider};
use crate::plan::RelNode;

/// Shared, thread-safe catalog handle. Lookups take a read lock only, so any
/// number of conversions can read it concurrently.
pub type InMemoryCatalog = Arc<RwLock<InternalCatalog>>;

/// Entries keyed by lowercased `(namespace, name)`, kept in registration
/// order. Re-registering an object replaces it in place.
#[derive(Debug, Default)]
pub struct InternalCatalog {
    entries: IndexMap<(String, String), CatalogEntry>,
}

/// JSON shape accepted by `load_from_json`.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    entries: Vec<CatalogRecord>,
}

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    namespace: String,
    name: String,
    #[serde(flatten)]
    entry: CatalogEntry,
}

fn catalog_key(namespace: &str, name: &str) -> (String, String) {
    (namespace.to_ascii_lowercase(), name.to_ascii_lowercase())
}

impl InternalCatalog {
    pub fn into_protected(self) -> InMemoryCatalog {
        Arc::new(RwLock::new(self))
    }

    pub fn insert(&mut self, namespace: &str, name: &str, entry: CatalogEntry) {
        self.entries.insert(catalog_key(namespace, name), entry);
    }

    pub fn get(&self, namespace: &str, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(&catalog_key(namespace, name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn list_entries(&self) -> Vec<(String, String)> {
        self.entries.keys().cloned().collect()
    }
}

pub trait CatalogCommon {
    fn new_catalog() -> Self;
    fn register_table(&self, namespace: &str, name: &str, columns: Vec<BaseColumn>) -> Result<(), CatalogError>;
    fn register_view(&self, namespace: &str, name: &str, plan: RelNode) -> Result<(), CatalogError>;
    fn list_entries(&self) -> Result<Vec<(String, String)>, CatalogError>;
    /// Load every entry of a catalog document, replacing same-named ones.
    /// Returns how many entries were loaded.
    fn load_from_json(&self, json_value: Value) -> Result<usize, CatalogError>;
    fn load_from_str(&self, text: &str) -> Result<usize, CatalogError>;
    fn load_from_file(&self, file_path: &Path) -> Result<usize, CatalogError>;
}

impl CatalogCommon for InMemoryCatalog {
    fn new_catalog() -> Self {
        InternalCatalog::default().into_protected()
    }

    fn register_table(&self, namespace: &str, name: &str, columns: Vec<BaseColumn>) -> Result<(), CatalogError> {
        let mut guard = self.write().map_err(|_| CatalogError::Poisoned)?;
        guard.insert(namespace, name, CatalogEntry::table(columns));
        Ok(())
    }

    fn register_view(&self, namespace: &str, name: &str, plan: RelNode) -> Result<(), CatalogError> {
        let mut guard = self.write().map_err(|_| CatalogError::Poisoned)?;
        guard.insert(namespace, name, CatalogEntry::view(plan));
        Ok(())
    }

    fn list_entries(&self) -> Result<Vec<(String, String)>, CatalogError> {
        let guard = self.read().map_err(|_| CatalogError::Poisoned)?;
        Ok(guard.list_entries())
    }

    fn load_from_json(&self, json_value: Value) -> Result<usize, CatalogError> {
        let document: CatalogDocument = serde_json::from_value(json_value)?;
        let mut guard = self.write().map_err(|_| CatalogError::Poisoned)?;
        let count = document.entries.len();
        for record in document.entries {
            guard.insert(&record.namespace, &record.name, record.entry);
        }
        tracing::debug!(count, "catalog entries loaded");
        Ok(count)
    }

    fn load_from_str(&self, text: &str) -> Result<usize, CatalogError> {
        let json_value = serde_json::from_str::<Value>(text)?;
        self.load_from_json(json_value)
    }

    fn load_from_file(&self, file_path: &Path) -> Result<usize, CatalogError> {
        let file_content = fs::read_to_string(file_path).map_err(|source| CatalogError::Io {
            path: file_path.to_string_lossy().into_owned(),
            source,
        })?;
        self.load_from_str(&file_content)
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn lookup(&self, namespace: &str, name: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        let guard = self.read().map_err(|_| CatalogError::Poisoned)?;
        Ok(guard.get(namespace, name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RelTypeKind;
    use serde_json::json;
    use std::{fs::File, io::Write};
    use tempfile::TempDir;

    fn sample_document() -> Value {
        json!({
            "entries": [
                {
                    "namespace": "default",
                    "name": "people",
                    "kind": "table",
                    "columns": [
                        { "name": "id", "kind": { "type": "big_int" } },
                        { "name": "name", "kind": { "type": "string" }, "nullable": true, "doc": "full name" }
                    ]
                }
            ]
        })
    }

    #[test]
    fn register_and_lookup_is_case_insensitive() {
        let catalog = InMemoryCatalog::new_catalog();
        catalog.register_table("Default", "People", vec![BaseColumn::new("id", RelTypeKind::Integer, false)]).unwrap();

        let entry = catalog.lookup("default", "people").unwrap().expect("entry");
        assert_eq!(entry, CatalogEntry::table(vec![BaseColumn::new("id", RelTypeKind::Integer, false)]));
        assert!(catalog.lookup("default", "missing").unwrap().is_none());
        assert_eq!(catalog.list_entries().unwrap(), vec![("default".to_string(), "people".to_string())]);
    }

    #[test]
    fn entries_keep_registration_order() {
        let catalog = InMemoryCatalog::new_catalog();
        catalog.register_table("default", "zeta", vec![]).unwrap();
        catalog.register_table("default", "alpha", vec![]).unwrap();
        catalog.register_table("default", "zeta", vec![BaseColumn::new("id", RelTypeKind::Integer, false)]).unwrap();

        let names = catalog.list_entries().unwrap().into_iter().map(|(_, name)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert!(matches!(catalog.lookup("default", "zeta"), Ok(Some(CatalogEntry::Table { columns })) if columns.len() == 1));
    }

    #[test]
    fn load_from_json_reads_tables() {
        let catalog = InMemoryCatalog::new_catalog();
        let count = catalog.load_from_json(sample_document()).unwrap();
        assert_eq!(count, 1);

        let Ok(Some(CatalogEntry::Table { columns })) = catalog.lookup("default", "people") else {
            panic!("expected a table entry");
        };
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].kind, RelTypeKind::BigInt);
        assert!(!columns[0].nullable);
        assert!(columns[1].nullable);
        assert_eq!(columns[1].doc.as_deref(), Some("full name"));
    }

    #[test]
    fn load_from_file_reads_document() {
        let catalog = InMemoryCatalog::new_catalog();
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("catalog.json");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(sample_document().to_string().as_bytes()).unwrap();

        assert_eq!(catalog.load_from_file(&file_path).unwrap(), 1);
        assert!(catalog.lookup("default", "people").unwrap().is_some());
    }

    #[test]
    fn load_from_file_reports_missing_file() {
        let catalog = InMemoryCatalog::new_catalog();
        let temp_dir = TempDir::new().unwrap();
        let result = catalog.load_from_file(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn load_from_str_rejects_invalid_json() {
        let catalog = InMemoryCatalog::new_catalog();
        let result = catalog.load_from_str("{ not json");
        assert!(matches!(result, Err(CatalogError::Json(_))));
        assert!(catalog.read().unwrap().is_empty());
    }

    #[test]
    fn poisoned_lock_is_reported_not_hidden() {
        let catalog = InMemoryCatalog::new_catalog();
        catalog.register_table("default", "people", vec![BaseColumn::new("id", RelTypeKind::Integer, false)]).unwrap();

        let writer = catalog.clone();
        let crashed = std::thread::spawn(move || {
            let _guard = writer.write().unwrap();
            panic!("writer crashed while holding the catalog lock");
        })
        .join();
        assert!(crashed.is_err());

        assert!(matches!(catalog.lookup("default", "people"), Err(CatalogError::Poisoned)));
        assert!(matches!(catalog.list_entries(), Err(CatalogError::Poisoned)));
        assert!(matches!(
            catalog.register_table("default", "other", vec![]),
            Err(CatalogError::Poisoned)
        ));
    }
}
