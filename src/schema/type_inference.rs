use crate::{
    plan::{Literal, ScalarExpr},
    schema::{resolve_field_position, LogicalType, PrimitiveKind, SchemaError, SchemaField, SchemaRecord, TypeMapper, TypeWidening},
};

#[derive(Default)]
pub struct TypeInference;

impl TypeInference {
    /// Type of `expr` evaluated over rows shaped like `input`.
    pub fn infer_scalar(expr: &ScalarExpr, input: &SchemaRecord) -> Result<LogicalType, SchemaError> {
        match expr {
            ScalarExpr::Column { .. } | ScalarExpr::FieldAccess { .. } => {
                Ok(Self::resolve_path(expr, input)?.ty)
            }
            ScalarExpr::Item { target, key } => {
                let target_ty = Self::infer_scalar(target, input)?;
                Self::infer_scalar(key, input)?;
                match target_ty.non_null() {
                    LogicalType::Array(element) => Ok(LogicalType::nullable(element.as_ref().clone())),
                    LogicalType::Map { value, .. } => Ok(LogicalType::nullable(value.as_ref().clone())),
                    other => Err(SchemaError::UnsupportedConstruct(format!(
                        "item access `{}` on non-collection type {}", expr, other
                    ))),
                }
            }
            ScalarExpr::Literal { value } => Ok(Self::infer_literal(value)),
            ScalarExpr::Cast { target, to } => {
                Self::infer_scalar(target, input)?;
                TypeMapper::map(to)
            }
            ScalarExpr::Function { name, args, return_type } => {
                let mut arg_types = Vec::with_capacity(args.len());
                for arg in args {
                    arg_types.push(Self::infer_scalar(arg, input)?);
                }
                match return_type {
                    Some(declared) => TypeMapper::map(declared),
                    None => Self::infer_function_type(name, &arg_types),
                }
            }
            ScalarExpr::WildCard => Err(SchemaError::UnsupportedConstruct(
                "wildcard outside of a projection list".into(),
            )),
        }
    }

    /// Doc of the input field a column reference or field access reads.
    pub fn source_doc(expr: &ScalarExpr, input: &SchemaRecord) -> Option<String> {
        match expr {
            ScalarExpr::Column { .. } | ScalarExpr::FieldAccess { .. } => {
                Self::resolve_path(expr, input).ok().and_then(|field| field.doc)
            }
            _ => None,
        }
    }

    fn resolve_path(expr: &ScalarExpr, input: &SchemaRecord) -> Result<SchemaField, SchemaError> {
        match expr {
            ScalarExpr::Column { name } => Ok(input.resolve(name)?.clone()),
            ScalarExpr::FieldAccess { target, field } => {
                let target_ty = Self::infer_scalar(target, input)?;
                let LogicalType::Struct(members) = target_ty.non_null() else {
                    return Err(SchemaError::UnsupportedConstruct(format!(
                        "field access `{}` on non-struct type {}", expr, target_ty
                    )));
                };
                let member = members[resolve_field_position(members, field)?].clone();
                if target_ty.is_nullable() {
                    Ok(SchemaField { ty: LogicalType::nullable(member.ty), ..member })
                } else {
                    Ok(member)
                }
            }
            other => Err(SchemaError::UnsupportedConstruct(format!("`{}` is not a field path", other))),
        }
    }

    pub fn infer_literal(value: &Literal) -> LogicalType {
        match value {
            Literal::Null => LogicalType::primitive(PrimitiveKind::Null),
            Literal::Bool(_) => LogicalType::primitive(PrimitiveKind::Boolean),
            Literal::Int(value) if i32::try_from(*value).is_ok() => LogicalType::primitive(PrimitiveKind::Int),
            Literal::Int(_) => LogicalType::primitive(PrimitiveKind::Long),
            Literal::Float(_) => LogicalType::primitive(PrimitiveKind::Double),
            Literal::String(_) => LogicalType::primitive(PrimitiveKind::String),
        }
    }

    // Builtins only; anything else needs a declared return type.
    fn infer_function_type(name: &str, args: &[LogicalType]) -> Result<LogicalType, SchemaError> {
        let lname = name.to_ascii_lowercase();
        let any_nullable = args.iter().any(LogicalType::is_nullable);
        let with_args_nullability = |ty: LogicalType| if any_nullable { LogicalType::nullable(ty) } else { ty };

        match (lname.as_str(), args) {
            ("=" | "==" | "<>" | "!=" | "<" | "<=" | ">" | ">=" | "and" | "or" | "not" | "like" | "in" | "between", _) => {
                Ok(with_args_nullability(LogicalType::primitive(PrimitiveKind::Boolean)))
            }

            ("is_null" | "is_not_null", [_]) => Ok(LogicalType::primitive(PrimitiveKind::Boolean)),

            ("upper" | "lower" | "trim" | "concat" | "substr" | "substring", [_, ..]) => {
                Ok(with_args_nullability(LogicalType::primitive(PrimitiveKind::String)))
            }

            ("length", [_]) => Ok(with_args_nullability(LogicalType::primitive(PrimitiveKind::Int))),

            // promoted type, nullable only if every input is
            ("coalesce", [first, rest @ ..]) => {
                let mut ty = first.clone();
                let mut all_nullable = first.is_nullable();
                for arg in rest {
                    ty = TypeWidening::widen_types(&ty, arg).ok_or_else(|| {
                        SchemaError::UnsupportedConstruct(format!("coalesce over {} and {}", ty, arg))
                    })?;
                    all_nullable = all_nullable && arg.is_nullable();
                }
                let bare = ty.into_non_null();
                Ok(if all_nullable { LogicalType::nullable(bare) } else { bare })
            }

            ("+" | "-" | "*" | "%", [first, rest @ ..]) => {
                let mut kind = Self::numeric_kind(&lname, first)?;
                for arg in rest {
                    let next = Self::numeric_kind(&lname, arg)?;
                    kind = TypeWidening::widen(kind, next).ok_or_else(|| {
                        SchemaError::UnsupportedConstruct(format!("operator {} over {} and {}", lname, kind, next))
                    })?;
                }
                Ok(with_args_nullability(LogicalType::primitive(kind)))
            }

            ("/", [_, _]) => {
                for arg in args {
                    Self::numeric_kind(&lname, arg)?;
                }
                Ok(with_args_nullability(LogicalType::primitive(PrimitiveKind::Double)))
            }

            _ => Err(SchemaError::UnsupportedConstruct(format!(
                "function {} has no declared return type", name
            ))),
        }
    }

    fn numeric_kind(operator: &str, ty: &LogicalType) -> Result<PrimitiveKind, SchemaError> {
        match ty.as_primitive() {
            Some(kind) if kind.is_numeric() => Ok(kind),
            _ => Err(SchemaError::UnsupportedConstruct(format!(
                "operator {} over non-numeric type {}", operator, ty
            ))),
        }
    }
}
