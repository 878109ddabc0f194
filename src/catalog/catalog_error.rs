use std::fmt::{self, Display};

/// Failures while populating an [`InMemoryCatalog`](crate::catalog::InMemoryCatalog).
#[derive(Debug)]
pub enum CatalogError {
    Io { path: String, source: std::io::Error },
    Json(serde_json::Error),
    Poisoned,
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io { path, source } => write!(f, "could not read catalog file {}: {}", path, source),
            CatalogError::Json(error) => write!(f, "invalid catalog document: {}", error),
            CatalogError::Poisoned => write!(f, "catalog lock poisoned"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io { source, .. } => Some(source),
            CatalogError::Json(error) => Some(error),
            CatalogError::Poisoned => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(error: serde_json::Error) -> Self {
        CatalogError::Json(error)
    }
}
