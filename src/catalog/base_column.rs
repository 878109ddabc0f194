use serde::{Deserialize, Serialize};

use crate::catalog::RelTypeKind;

/// One column of a base table as declared in the catalog.
///
/// This is the `(name, type, nullable)` triple the catalog hands out, plus
/// the optional column comment which becomes the field doc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseColumn {
    pub name: String,
    pub kind: RelTypeKind,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl BaseColumn {
    pub fn new(name: &str, kind: RelTypeKind, nullable: bool) -> Self {
        Self { name: name.to_string(), kind, nullable, doc: None }
    }

    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }
}
