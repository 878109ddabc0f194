use crate::{
    catalog::{BaseColumn, RelType, RelTypeKind},
    schema::{LogicalType, PrimitiveKind, SchemaError, SchemaField},
};

pub struct TypeMapper;

impl TypeMapper {
    /// Map a relational type into the schema type system. Nullable types
    /// come back wrapped in `Nullable`, non-nullable ones unwrapped.
    pub fn map(rel_type: &RelType) -> Result<LogicalType, SchemaError> {
        Self::map_kind(&rel_type.kind, rel_type.nullable)
    }

    pub fn map_kind(kind: &RelTypeKind, nullable: bool) -> Result<LogicalType, SchemaError> {
        let mapped = match kind {
            RelTypeKind::Boolean => LogicalType::primitive(PrimitiveKind::Boolean),
            RelTypeKind::TinyInt => LogicalType::primitive(PrimitiveKind::TinyInt),
            RelTypeKind::SmallInt => LogicalType::primitive(PrimitiveKind::SmallInt),
            RelTypeKind::Integer => LogicalType::primitive(PrimitiveKind::Int),
            RelTypeKind::BigInt => LogicalType::primitive(PrimitiveKind::Long),
            RelTypeKind::Float => LogicalType::primitive(PrimitiveKind::Float),
            RelTypeKind::Double => LogicalType::primitive(PrimitiveKind::Double),
            RelTypeKind::Decimal { precision, scale } => {
                LogicalType::primitive(PrimitiveKind::Decimal { precision: *precision, scale: *scale })
            }
            RelTypeKind::Char { .. } | RelTypeKind::Varchar { .. } | RelTypeKind::String => {
                LogicalType::primitive(PrimitiveKind::String)
            }
            RelTypeKind::Binary => LogicalType::primitive(PrimitiveKind::Bytes),
            RelTypeKind::Date => LogicalType::primitive(PrimitiveKind::Date),
            RelTypeKind::Timestamp => LogicalType::primitive(PrimitiveKind::Timestamp),
            RelTypeKind::Null => LogicalType::primitive(PrimitiveKind::Null),
            RelTypeKind::Struct { fields } => {
                let mut mapped = Vec::with_capacity(fields.len());
                for field in fields {
                    mapped.push(SchemaField::new(&field.name, Self::map(&field.ty)?).with_doc(field.doc.clone()));
                }
                LogicalType::Struct(mapped)
            }
            RelTypeKind::Array { element } => LogicalType::array(Self::map(element)?),
            RelTypeKind::Map { key, value } => LogicalType::map(Self::map(key)?, Self::map(value)?),
            RelTypeKind::Enum { symbols } => LogicalType::Enum(symbols.clone()),
            RelTypeKind::Other { name } => {
                return Err(SchemaError::UnsupportedConstruct(format!("relational type {}", name)));
            }
        };

        Ok(if nullable { LogicalType::nullable(mapped) } else { mapped })
    }

    pub fn map_column(column: &BaseColumn) -> Result<SchemaField, SchemaError> {
        let ty = Self::map_kind(&column.kind, column.nullable)?;
        Ok(SchemaField::new(&column.name, ty).with_doc(column.doc.clone()))
    }

    /// Catalog columns in declaration order.
    pub fn map_columns(columns: &[BaseColumn]) -> Result<Vec<SchemaField>, SchemaError> {
        columns.iter().map(Self::map_column).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RelField;

    #[test]
    fn scalars_map_to_primitives() {
        let cases = [
            (RelTypeKind::Boolean, PrimitiveKind::Boolean),
            (RelTypeKind::Integer, PrimitiveKind::Int),
            (RelTypeKind::BigInt, PrimitiveKind::Long),
            (RelTypeKind::Varchar { length: 20 }, PrimitiveKind::String),
            (RelTypeKind::Binary, PrimitiveKind::Bytes),
            (RelTypeKind::Decimal { precision: 12, scale: 4 }, PrimitiveKind::Decimal { precision: 12, scale: 4 }),
        ];
        for (kind, expected) in cases {
            assert_eq!(TypeMapper::map_kind(&kind, false).unwrap(), LogicalType::primitive(expected));
        }
    }

    #[test]
    fn nested_types_keep_order_and_nullability() {
        let rel = RelType::nullable(RelTypeKind::struct_of(vec![
            RelField::new("b", RelType::not_null(RelTypeKind::String)).with_doc("second letter"),
            RelField::new("a", RelType::nullable(RelTypeKind::array(RelType::nullable(RelTypeKind::Integer)))),
        ]));

        let mapped = TypeMapper::map(&rel).unwrap();
        let expected = LogicalType::nullable(LogicalType::Struct(vec![
            SchemaField::new("b", LogicalType::primitive(PrimitiveKind::String)).with_doc(Some("second letter".into())),
            SchemaField::new("a", LogicalType::nullable(LogicalType::array(
                LogicalType::nullable(LogicalType::primitive(PrimitiveKind::Int)),
            ))),
        ]));
        assert_eq!(mapped, expected);
    }

    #[test]
    fn enum_symbols_are_kept_verbatim() {
        let kind = RelTypeKind::enum_of(["SPADES", "HEARTS", "DIAMONDS", "CLUBS"]);
        assert_eq!(
            TypeMapper::map_kind(&kind, false).unwrap(),
            LogicalType::Enum(vec!["SPADES".into(), "HEARTS".into(), "DIAMONDS".into(), "CLUBS".into()])
        );
    }

    #[test]
    fn map_types_recurse() {
        let rel = RelType::not_null(RelTypeKind::map(
            RelType::not_null(RelTypeKind::String),
            RelType::nullable(RelTypeKind::Double),
        ));
        assert_eq!(
            TypeMapper::map(&rel).unwrap(),
            LogicalType::map(
                LogicalType::primitive(PrimitiveKind::String),
                LogicalType::nullable(LogicalType::primitive(PrimitiveKind::Double)),
            )
        );
    }

    #[test]
    fn unknown_kinds_are_unsupported() {
        let kind = RelTypeKind::array(RelType::not_null(RelTypeKind::Other { name: "INTERVAL".into() }));
        assert!(matches!(TypeMapper::map_kind(&kind, true), Err(SchemaError::UnsupportedConstruct(_))));
    }

    #[test]
    fn base_columns_keep_doc_and_order() {
        let columns = vec![
            BaseColumn::new("Id", RelTypeKind::Integer, false),
            BaseColumn::new("Name", RelTypeKind::String, true).with_doc("display name"),
        ];
        let fields = TypeMapper::map_columns(&columns).unwrap();
        assert_eq!(fields[0], SchemaField::new("Id", LogicalType::primitive(PrimitiveKind::Int)));
        assert_eq!(fields[1].ty, LogicalType::nullable(LogicalType::primitive(PrimitiveKind::String)));
        assert_eq!(fields[1].doc.as_deref(), Some("display name"));
    }
}
