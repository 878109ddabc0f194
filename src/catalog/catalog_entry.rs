use serde::Deserialize;

use crate::{catalog::BaseColumn, plan::RelNode};

/// What a `(namespace, name)` pair resolves to in the catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogEntry {
    /// A base table, columns in declaration order.
    Table { columns: Vec<BaseColumn> },
    /// A view, already compiled to its validated relational plan.
    View { plan: RelNode },
}

impl CatalogEntry {
    pub fn table(columns: Vec<BaseColumn>) -> Self {
        CatalogEntry::Table { columns }
    }

    pub fn view(plan: RelNode) -> Self {
        CatalogEntry::View { plan }
    }
}
