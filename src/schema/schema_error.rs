use std::fmt::{self, Display};

use crate::schema::LogicalType;

/// Why a schema could not be derived. Derivation stops at the first error;
/// no partial schema is ever returned.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// A plan shape or type the converter (or plan construction) does not handle.
    UnsupportedConstruct(String),
    /// Set operation branches disagree at a position. `branch` and `position`
    /// are zero-based; `expected` is the first branch's type at that position.
    TypeMismatchInSetOp { branch: usize, position: usize, expected: LogicalType, found: LogicalType },
    SetOpArityMismatch { branch: usize, expected: usize, found: usize },
    UnresolvedColumnReference { name: String, candidates: Vec<String> },
    SchemaResolutionFailure { namespace: String, name: String, reason: String },
    Render(String),
    /// Any of the above, raised while converting `namespace.name`.
    InObject { namespace: String, name: String, source: Box<SchemaError> },
}

impl SchemaError {
    pub fn unresolvable(namespace: &str, name: &str, reason: &str) -> Self {
        SchemaError::SchemaResolutionFailure {
            namespace: namespace.to_string(),
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Attach the object being converted. Errors that already name it are
    /// returned as they are.
    pub fn with_origin(self, namespace: &str, name: &str) -> Self {
        match self {
            SchemaError::InObject { .. } => self,
            SchemaError::SchemaResolutionFailure { namespace: ref ns, name: ref n, .. }
                if ns == namespace && n == name => self,
            other => SchemaError::InObject {
                namespace: namespace.to_string(),
                name: name.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error with origin attachments stripped.
    pub fn root(&self) -> &SchemaError {
        match self {
            SchemaError::InObject { source, .. } => source.root(),
            other => other,
        }
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::UnsupportedConstruct(what) => write!(f, "unsupported construct: {}", what),
            SchemaError::TypeMismatchInSetOp { branch, position, expected, found } => write!(
                f,
                "set operation branch {} has type {} at position {}, incompatible with {}",
                branch, found, position, expected
            ),
            SchemaError::SetOpArityMismatch { branch, expected, found } => write!(
                f,
                "set operation branch {} has {} fields, expected {}",
                branch, found, expected
            ),
            SchemaError::UnresolvedColumnReference { name, candidates } => {
                write!(f, "unresolved column reference '{}'", name)?;
                if !candidates.is_empty() {
                    write!(f, " (available: {})", candidates.join(", "))?;
                }
                Ok(())
            }
            SchemaError::SchemaResolutionFailure { namespace, name, reason } => {
                write!(f, "cannot resolve {}.{}: {}", namespace, name, reason)
            }
            SchemaError::Render(message) => write!(f, "cannot render schema: {}", message),
            SchemaError::InObject { namespace, name, source } => write!(f, "{}.{}: {}", namespace, name, source),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::InObject { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
