pub mod rel_type;
pub use rel_type::*;

pub mod base_column;
pub use base_column::*;

pub mod catalog_entry;
pub use catalog_entry::*;

pub mod catalog_error;
pub use catalog_error::*;

pub mod memory_catalog;
pub use memory_catalog::*;

pub trait CatalogProvider: Send + Sync {
    /// Resolve a `(namespace, name)` pair to a base table or a view plan.
    /// `Ok(None)` when the catalog does not know the object; `Err` when the
    /// catalog itself cannot be read.
    fn lookup(&self, namespace: &str, name: &str) -> Result<Option<CatalogEntry>, CatalogError>;
}
