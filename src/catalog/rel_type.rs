use std::fmt;

use serde::{Deserialize, Serialize};

/// Relational type as reported by the catalog and carried by plan expressions.
///
/// Nullability lives on the wrapper so that every nesting level (struct
/// fields, array elements, map values) can state its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelType {
    #[serde(flatten)]
    pub kind: RelTypeKind,
    #[serde(default)]
    pub nullable: bool,
}

/// The relational type kinds known to the catalog.
///
/// `Other` stands for kinds the schema side has no representation for
/// (intervals, opaque UDTs, ...). It is accepted by the catalog but any
/// attempt to map it fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelTypeKind {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Double,
    Decimal { precision: u8, scale: u8 },
    Char { length: u32 },
    Varchar { length: u32 },
    String,
    Binary,
    Date,
    Timestamp,
    Null,
    Struct { fields: Vec<RelField> },
    Array { element: Box<RelType> },
    Map { key: Box<RelType>, value: Box<RelType> },
    Enum { symbols: Vec<String> },
    Other { name: String },
}

/// A named member of a relational struct type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelField {
    pub name: String,
    pub ty: RelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl RelType {
    pub fn new(kind: RelTypeKind, nullable: bool) -> Self {
        Self { kind, nullable }
    }

    pub fn not_null(kind: RelTypeKind) -> Self {
        Self::new(kind, false)
    }

    pub fn nullable(kind: RelTypeKind) -> Self {
        Self::new(kind, true)
    }

    pub fn is_map(&self) -> bool {
        matches!(self.kind, RelTypeKind::Map { .. })
    }
}

impl RelTypeKind {
    pub fn array(element: RelType) -> Self {
        RelTypeKind::Array { element: Box::new(element) }
    }

    pub fn map(key: RelType, value: RelType) -> Self {
        RelTypeKind::Map { key: Box::new(key), value: Box::new(value) }
    }

    pub fn struct_of(fields: Vec<RelField>) -> Self {
        RelTypeKind::Struct { fields }
    }

    pub fn enum_of<S: Into<String>>(symbols: impl IntoIterator<Item = S>) -> Self {
        RelTypeKind::Enum { symbols: symbols.into_iter().map(Into::into).collect() }
    }
}

impl RelField {
    pub fn new(name: impl Into<String>, ty: RelType) -> Self {
        Self { name: name.into(), ty, doc: None }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

impl fmt::Display for RelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{} NULL", self.kind)
        } else {
            write!(f, "{} NOT NULL", self.kind)
        }
    }
}

impl fmt::Display for RelTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelTypeKind::Boolean => write!(f, "BOOLEAN"),
            RelTypeKind::TinyInt => write!(f, "TINYINT"),
            RelTypeKind::SmallInt => write!(f, "SMALLINT"),
            RelTypeKind::Integer => write!(f, "INTEGER"),
            RelTypeKind::BigInt => write!(f, "BIGINT"),
            RelTypeKind::Float => write!(f, "FLOAT"),
            RelTypeKind::Double => write!(f, "DOUBLE"),
            RelTypeKind::Decimal { precision, scale } => write!(f, "DECIMAL({}, {})", precision, scale),
            RelTypeKind::Char { length } => write!(f, "CHAR({})", length),
            RelTypeKind::Varchar { length } => write!(f, "VARCHAR({})", length),
            RelTypeKind::String => write!(f, "STRING"),
            RelTypeKind::Binary => write!(f, "BINARY"),
            RelTypeKind::Date => write!(f, "DATE"),
            RelTypeKind::Timestamp => write!(f, "TIMESTAMP"),
            RelTypeKind::Null => write!(f, "NULL"),
            RelTypeKind::Struct { fields } => {
                write!(f, "STRUCT<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.ty.kind)?;
                }
                write!(f, ">")
            }
            RelTypeKind::Array { element } => write!(f, "ARRAY<{}>", element.kind),
            RelTypeKind::Map { key, value } => write!(f, "MAP<{}, {}>", key.kind, value.kind),
            RelTypeKind::Enum { symbols } => write!(f, "ENUM({})", symbols.join(", ")),
            RelTypeKind::Other { name } => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_nested_types_with_nullability() {
        let value = json!({
            "type": "array",
            "nullable": true,
            "element": {
                "type": "struct",
                "fields": [
                    { "name": "a", "ty": { "type": "integer" } },
                    { "name": "b", "ty": { "type": "decimal", "precision": 10, "scale": 2, "nullable": true } }
                ]
            }
        });

        let ty: RelType = serde_json::from_value(value).unwrap();
        assert!(ty.nullable);
        let RelTypeKind::Array { element } = ty.kind else { panic!("expected array") };
        assert!(!element.nullable);
        let RelTypeKind::Struct { fields } = element.kind else { panic!("expected struct") };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].ty, RelType::not_null(RelTypeKind::Integer));
        assert_eq!(fields[1].ty, RelType::nullable(RelTypeKind::Decimal { precision: 10, scale: 2 }));
    }

    #[test]
    fn display_is_sql_like() {
        let ty = RelType::nullable(RelTypeKind::map(
            RelType::not_null(RelTypeKind::String),
            RelType::nullable(RelTypeKind::BigInt),
        ));
        assert_eq!(ty.to_string(), "MAP<STRING, BIGINT> NULL");
        assert!(ty.is_map());
    }
}
