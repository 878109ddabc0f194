use crate::schema::{SchemaError, SchemaField, SchemaRecord, TypeWidening};

pub struct SchemaMerger;

impl SchemaMerger {
    /// Reconcile set operation branches position by position.
    ///
    /// Names, docs and nullability come from the first branch; later branches
    /// only have to be compatible, possibly widening the type at a position.
    pub fn merge(branches: &[SchemaRecord]) -> Result<SchemaRecord, SchemaError> {
        let [first, rest @ ..] = branches else {
            return Err(SchemaError::UnsupportedConstruct("set operation without branches".into()));
        };
        if rest.is_empty() {
            return Err(SchemaError::UnsupportedConstruct(
                "set operation needs at least two branches".into(),
            ));
        }

        let mut merged: Vec<SchemaField> = first.fields.clone();
        for (offset, branch) in rest.iter().enumerate() {
            let branch_index = offset + 1;
            if branch.len() != merged.len() {
                return Err(SchemaError::SetOpArityMismatch {
                    branch: branch_index,
                    expected: merged.len(),
                    found: branch.len(),
                });
            }

            for (position, (field, other)) in merged.iter_mut().zip(&branch.fields).enumerate() {
                let widened = TypeWidening::widen_types(&field.ty, &other.ty).ok_or_else(|| {
                    SchemaError::TypeMismatchInSetOp {
                        branch: branch_index,
                        position,
                        expected: first.fields[position].ty.clone(),
                        found: other.ty.clone(),
                    }
                })?;
                // names and nullability stay with the first branch
                field.ty = widened.with_nullability_of(&first.fields[position].ty);
            }
        }

        tracing::trace!(branches = branches.len(), fields = merged.len(), "set operation merged");
        Ok(SchemaRecord::new(&first.name, merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LogicalType, PrimitiveKind};

    fn p(kind: PrimitiveKind) -> LogicalType {
        LogicalType::primitive(kind)
    }

    fn record(name: &str, fields: Vec<(&str, LogicalType)>) -> SchemaRecord {
        SchemaRecord::new(name, fields.into_iter().map(|(n, ty)| SchemaField::new(n, ty)).collect())
    }

    #[test]
    fn names_and_nullability_come_from_first_branch() {
        let first = record("a", vec![("Id", p(PrimitiveKind::Int)), ("Name", p(PrimitiveKind::String))]);
        let second = record("b", vec![
            ("other_id", LogicalType::nullable(p(PrimitiveKind::Long))),
            ("other_name", p(PrimitiveKind::String)),
        ]);
        let third = record("c", vec![("x", p(PrimitiveKind::SmallInt)), ("y", p(PrimitiveKind::String))]);

        let merged = SchemaMerger::merge(&[first, second, third]).unwrap();
        assert_eq!(merged.name, "a");
        assert_eq!(merged.field_names(), vec!["Id", "Name"]);
        assert_eq!(merged.fields[0].ty, p(PrimitiveKind::Long));
        assert_eq!(merged.fields[1].ty, p(PrimitiveKind::String));
    }

    #[test]
    fn incompatible_position_is_reported() {
        let first = record("a", vec![("Id", p(PrimitiveKind::Int)), ("Name", p(PrimitiveKind::String))]);
        let second = record("b", vec![("Id", p(PrimitiveKind::Int)), ("Name", p(PrimitiveKind::String))]);
        let third = record("c", vec![("Id", p(PrimitiveKind::Int)), ("Name", p(PrimitiveKind::Boolean))]);

        match SchemaMerger::merge(&[first, second, third]) {
            Err(SchemaError::TypeMismatchInSetOp { branch, position, expected, found }) => {
                assert_eq!((branch, position), (2, 1));
                assert_eq!(expected, p(PrimitiveKind::String));
                assert_eq!(found, p(PrimitiveKind::Boolean));
            }
            other => panic!("expected a set operation mismatch, got {other:?}"),
        }
    }

    #[test]
    fn mismatch_reports_the_first_branch_type() {
        let first = record("a", vec![("Id", p(PrimitiveKind::Int))]);
        let second = record("b", vec![("Id", p(PrimitiveKind::Long))]);
        let third = record("c", vec![("Id", p(PrimitiveKind::Boolean))]);

        match SchemaMerger::merge(&[first, second, third]) {
            Err(SchemaError::TypeMismatchInSetOp { branch, expected, found, .. }) => {
                assert_eq!(branch, 2);
                assert_eq!(expected, p(PrimitiveKind::Int));
                assert_eq!(found, p(PrimitiveKind::Boolean));
            }
            other => panic!("expected a set operation mismatch, got {other:?}"),
        }
    }

    #[test]
    fn arity_and_branch_count_are_checked() {
        let first = record("a", vec![("Id", p(PrimitiveKind::Int))]);
        let second = record("b", vec![("Id", p(PrimitiveKind::Int)), ("Extra", p(PrimitiveKind::Int))]);

        assert!(matches!(
            SchemaMerger::merge(&[first.clone(), second]),
            Err(SchemaError::SetOpArityMismatch { branch: 1, expected: 1, found: 2 })
        ));
        assert!(matches!(SchemaMerger::merge(&[first]), Err(SchemaError::UnsupportedConstruct(_))));
        assert!(matches!(SchemaMerger::merge(&[]), Err(SchemaError::UnsupportedConstruct(_))));
    }
}
