use std::fmt;

use crate::schema::SchemaField;

/// Scalar kinds of the output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Null,
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    Long,
    Float,
    Double,
    Decimal { precision: u8, scale: u8 },
    String,
    Bytes,
    Date,
    Timestamp,
}

/// Nested type of an output field.
///
/// Nullability is a wrapper, never a flag: `Nullable` wraps exactly one
/// level, and nested nullability is expressed by nesting, e.g.
/// `Nullable(Array(Nullable(Primitive(String))))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalType {
    Primitive(PrimitiveKind),
    Struct(Vec<SchemaField>),
    Array(Box<LogicalType>),
    Map { key: Box<LogicalType>, value: Box<LogicalType> },
    Enum(Vec<String>),
    Nullable(Box<LogicalType>),
}

impl PrimitiveKind {
    pub fn is_integral(&self) -> bool {
        matches!(self, PrimitiveKind::TinyInt | PrimitiveKind::SmallInt | PrimitiveKind::Int | PrimitiveKind::Long)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integral()
            || matches!(self, PrimitiveKind::Float | PrimitiveKind::Double | PrimitiveKind::Decimal { .. })
    }
}

impl LogicalType {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        LogicalType::Primitive(kind)
    }

    pub fn array(element: LogicalType) -> Self {
        LogicalType::Array(Box::new(element))
    }

    pub fn map(key: LogicalType, value: LogicalType) -> Self {
        LogicalType::Map { key: Box::new(key), value: Box::new(value) }
    }

    /// Wrap in `Nullable` unless the type already admits null.
    pub fn nullable(inner: LogicalType) -> Self {
        match inner {
            LogicalType::Nullable(_) | LogicalType::Primitive(PrimitiveKind::Null) => inner,
            other => LogicalType::Nullable(Box::new(other)),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, LogicalType::Nullable(_) | LogicalType::Primitive(PrimitiveKind::Null))
    }

    /// The type with its outer `Nullable` wrapper, if any, removed.
    pub fn non_null(&self) -> &LogicalType {
        match self {
            LogicalType::Nullable(inner) => inner.as_ref(),
            other => other,
        }
    }

    pub fn into_non_null(self) -> LogicalType {
        match self {
            LogicalType::Nullable(inner) => *inner,
            other => other,
        }
    }

    /// Re-apply the outer nullability of `template` to this type.
    pub fn with_nullability_of(self, template: &LogicalType) -> LogicalType {
        let bare = self.into_non_null();
        if template.is_nullable() {
            LogicalType::nullable(bare)
        } else {
            bare
        }
    }

    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self.non_null() {
            LogicalType::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Null => write!(f, "null"),
            PrimitiveKind::Boolean => write!(f, "boolean"),
            PrimitiveKind::TinyInt => write!(f, "tinyint"),
            PrimitiveKind::SmallInt => write!(f, "smallint"),
            PrimitiveKind::Int => write!(f, "int"),
            PrimitiveKind::Long => write!(f, "long"),
            PrimitiveKind::Float => write!(f, "float"),
            PrimitiveKind::Double => write!(f, "double"),
            PrimitiveKind::Decimal { precision, scale } => write!(f, "decimal({},{})", precision, scale),
            PrimitiveKind::String => write!(f, "string"),
            PrimitiveKind::Bytes => write!(f, "bytes"),
            PrimitiveKind::Date => write!(f, "date"),
            PrimitiveKind::Timestamp => write!(f, "timestamp"),
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Primitive(kind) => write!(f, "{}", kind),
            LogicalType::Struct(fields) => {
                write!(f, "struct<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.ty)?;
                }
                write!(f, ">")
            }
            LogicalType::Array(element) => write!(f, "array<{}>", element),
            LogicalType::Map { key, value } => write!(f, "map<{}, {}>", key, value),
            LogicalType::Enum(symbols) => write!(f, "enum<{}>", symbols.join(", ")),
            LogicalType::Nullable(inner) => write!(f, "nullable<{}>", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_wraps_exactly_once() {
        let int = LogicalType::primitive(PrimitiveKind::Int);
        let once = LogicalType::nullable(int.clone());
        let twice = LogicalType::nullable(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.non_null(), &int);

        let null = LogicalType::primitive(PrimitiveKind::Null);
        assert_eq!(LogicalType::nullable(null.clone()), null);
    }

    #[test]
    fn with_nullability_of_follows_template() {
        let int = LogicalType::primitive(PrimitiveKind::Int);
        let nullable_long = LogicalType::nullable(LogicalType::primitive(PrimitiveKind::Long));

        assert_eq!(nullable_long.clone().with_nullability_of(&int), LogicalType::primitive(PrimitiveKind::Long));
        assert_eq!(int.clone().with_nullability_of(&nullable_long), LogicalType::nullable(int));
    }

    #[test]
    fn display_nests() {
        let ty = LogicalType::nullable(LogicalType::map(
            LogicalType::primitive(PrimitiveKind::String),
            LogicalType::array(LogicalType::primitive(PrimitiveKind::Decimal { precision: 10, scale: 2 })),
        ));
        assert_eq!(ty.to_string(), "nullable<map<string, array<decimal(10,2)>>>");
    }
}
