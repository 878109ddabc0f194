use crate::{
    plan::{AggregateCall, ScalarExpr},
    schema::{LogicalType, PrimitiveKind, SchemaError, SchemaRecord, TypeInference, TypeMapper},
};

pub struct AggregateTyper;

impl AggregateTyper {
    pub fn is_aggregate_name(name: &str) -> bool {
        matches!(
            name.to_ascii_lowercase().as_str(),
            "count" | "sum" | "avg" | "min" | "max" | "collect_list" | "collect_set"
        )
    }

    /// Result type of `call` over `input`. `grouped` is false for a global
    /// aggregate (no group keys), where sum/avg/min/max see empty input as null.
    pub fn infer(call: &AggregateCall, input: &SchemaRecord, grouped: bool) -> Result<LogicalType, SchemaError> {
        let mut arg_types = Vec::with_capacity(call.args.len());
        for arg in call.args.iter().filter(|arg| !arg.is_wildcard()) {
            arg_types.push(TypeInference::infer_scalar(arg, input)?);
        }

        if let Some(declared) = &call.return_type {
            return TypeMapper::map(declared);
        }

        let name = call.normalized_name();
        match (name.as_str(), arg_types.as_slice()) {
            ("count", _) => Ok(LogicalType::primitive(PrimitiveKind::Long)),

            ("sum", [arg]) => {
                let kind = match arg.as_primitive() {
                    Some(kind) if kind.is_integral() => PrimitiveKind::Long,
                    Some(PrimitiveKind::Float | PrimitiveKind::Double) => PrimitiveKind::Double,
                    Some(decimal @ PrimitiveKind::Decimal { .. }) => decimal,
                    _ => return Err(Self::unsupported_argument(call, arg)),
                };
                Ok(Self::nullable_result(LogicalType::primitive(kind), arg, grouped))
            }

            ("avg", [arg]) => match arg.as_primitive() {
                Some(kind) if kind.is_numeric() => {
                    Ok(Self::nullable_result(LogicalType::primitive(PrimitiveKind::Double), arg, grouped))
                }
                _ => Err(Self::unsupported_argument(call, arg)),
            },

            ("min" | "max", [arg]) => Ok(Self::nullable_result(arg.non_null().clone(), arg, grouped)),

            ("collect_list" | "collect_set", [arg]) => Ok(LogicalType::array(arg.clone())),

            _ => Err(SchemaError::UnsupportedConstruct(format!(
                "aggregate {} has no declared return type", call
            ))),
        }
    }

    fn nullable_result(result: LogicalType, arg: &LogicalType, grouped: bool) -> LogicalType {
        if arg.is_nullable() || !grouped {
            LogicalType::nullable(result)
        } else {
            result
        }
    }

    fn unsupported_argument(call: &AggregateCall, arg: &LogicalType) -> SchemaError {
        SchemaError::UnsupportedConstruct(format!("aggregate {} over type {}", call, arg))
    }

    pub fn contains_aggregate(expr: &ScalarExpr) -> bool {
        match expr {
            ScalarExpr::Function { name, .. } if Self::is_aggregate_name(name) => true,
            ScalarExpr::Function { args, .. } => args.iter().any(Self::contains_aggregate),
            ScalarExpr::FieldAccess { target, .. } | ScalarExpr::Cast { target, .. } => Self::contains_aggregate(target),
            ScalarExpr::Item { target, key } => Self::contains_aggregate(target) || Self::contains_aggregate(key),
            ScalarExpr::Column { .. } | ScalarExpr::Literal { .. } | ScalarExpr::WildCard => false,
        }
    }
}
