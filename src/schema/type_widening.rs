use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::schema::{LogicalType, PrimitiveKind, SchemaField};

const FROM_TINYINT: &[PrimitiveKind] = &[
    PrimitiveKind::SmallInt,
    PrimitiveKind::Int,
    PrimitiveKind::Long,
    PrimitiveKind::Float,
    PrimitiveKind::Double,
];
const FROM_SMALLINT: &[PrimitiveKind] = &[PrimitiveKind::Int, PrimitiveKind::Long, PrimitiveKind::Float, PrimitiveKind::Double];
const FROM_INT: &[PrimitiveKind] = &[PrimitiveKind::Long, PrimitiveKind::Float, PrimitiveKind::Double];
const FROM_LONG: &[PrimitiveKind] = &[PrimitiveKind::Float, PrimitiveKind::Double];
const FROM_FLOAT: &[PrimitiveKind] = &[PrimitiveKind::Double];

/// Numeric kinds each kind may be widened to. Anything not listed only
/// matches itself.
static NUMERIC_WIDENING: Lazy<HashMap<PrimitiveKind, &'static [PrimitiveKind]>> = Lazy::new(|| {
    HashMap::from([
        (PrimitiveKind::TinyInt, FROM_TINYINT),
        (PrimitiveKind::SmallInt, FROM_SMALLINT),
        (PrimitiveKind::Int, FROM_INT),
        (PrimitiveKind::Long, FROM_LONG),
        (PrimitiveKind::Float, FROM_FLOAT),
    ])
});

pub struct TypeWidening;

impl TypeWidening {
    pub fn can_widen(from: PrimitiveKind, to: PrimitiveKind) -> bool {
        from == to || NUMERIC_WIDENING.get(&from).is_some_and(|targets| targets.contains(&to))
    }

    /// Common kind of `a` and `b`, if one widens to the other.
    pub fn widen(a: PrimitiveKind, b: PrimitiveKind) -> Option<PrimitiveKind> {
        if Self::can_widen(a, b) {
            Some(b)
        } else if Self::can_widen(b, a) {
            Some(a)
        } else {
            None
        }
    }

    /// Structural common type of `first` and `other`.
    ///
    /// Nullable wrappers are ignored for the comparison at every level and
    /// the result keeps `first`'s wrappers and field names. A null-typed side
    /// is compatible with anything.
    pub fn widen_types(first: &LogicalType, other: &LogicalType) -> Option<LogicalType> {
        let widened = match (first.non_null(), other.non_null()) {
            (LogicalType::Primitive(PrimitiveKind::Null), candidate) => {
                return Some(LogicalType::nullable(candidate.clone()));
            }
            (_, LogicalType::Primitive(PrimitiveKind::Null)) => return Some(first.clone()),
            (LogicalType::Primitive(a), LogicalType::Primitive(b)) => LogicalType::Primitive(Self::widen(*a, *b)?),
            (LogicalType::Struct(left), LogicalType::Struct(right)) => {
                if left.len() != right.len() {
                    return None;
                }
                let mut fields = Vec::with_capacity(left.len());
                for (l, r) in left.iter().zip(right) {
                    if !l.name.eq_ignore_ascii_case(&r.name) {
                        return None;
                    }
                    fields.push(SchemaField {
                        name: l.name.clone(),
                        ty: Self::widen_types(&l.ty, &r.ty)?,
                        doc: l.doc.clone(),
                    });
                }
                LogicalType::Struct(fields)
            }
            (LogicalType::Array(left), LogicalType::Array(right)) => LogicalType::array(Self::widen_types(left, right)?),
            (LogicalType::Map { key: lk, value: lv }, LogicalType::Map { key: rk, value: rv }) => {
                LogicalType::map(Self::widen_types(lk, rk)?, Self::widen_types(lv, rv)?)
            }
            (LogicalType::Enum(left), LogicalType::Enum(right)) if left == right => LogicalType::Enum(left.clone()),
            _ => return None,
        };
        Some(widened.with_nullability_of(first))
    }
}
