use serde::Deserialize;
use std::fmt;

use crate::{catalog::RelType, plan::Literal};

/// Expression tree carried by projection lists, predicates, aggregate
/// arguments and lateral sources. Column references are by output name of
/// the input relation; the plan is already validated upstream.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum ScalarExpr {
    Column { name: String },
    /// `target.field` on a struct-valued expression.
    FieldAccess { target: Box<ScalarExpr>, field: String },
    /// `target[key]` on an array (by position) or a map (by key).
    Item { target: Box<ScalarExpr>, key: Box<ScalarExpr> },
    Literal { value: Literal },
    /// Builtin operator or user function. `return_type` is the type the
    /// compiler declared for it, if any.
    Function {
        name: String,
        #[serde(default)]
        args: Vec<ScalarExpr>,
        #[serde(default)]
        return_type: Option<RelType>,
    },
    Cast { target: Box<ScalarExpr>, to: RelType },
    /// Whole-row reference (`SELECT *`); only meaningful in a projection list.
    WildCard,
}

/// One entry of a projection list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ProjectItem {
    pub expression: ScalarExpr,
    #[serde(default)]
    pub alias: Option<String>,
}

impl ScalarExpr {
    pub fn column(name: &str) -> Self {
        ScalarExpr::Column { name: name.to_string() }
    }

    pub fn field(target: ScalarExpr, field: &str) -> Self {
        ScalarExpr::FieldAccess { target: Box::new(target), field: field.to_string() }
    }

    pub fn item(target: ScalarExpr, key: ScalarExpr) -> Self {
        ScalarExpr::Item { target: Box::new(target), key: Box::new(key) }
    }

    pub fn literal(value: Literal) -> Self {
        ScalarExpr::Literal { value }
    }

    pub fn int(value: i64) -> Self {
        ScalarExpr::literal(Literal::Int(value))
    }

    pub fn string(value: &str) -> Self {
        ScalarExpr::literal(Literal::String(value.to_string()))
    }

    pub fn call(name: &str, args: Vec<ScalarExpr>) -> Self {
        ScalarExpr::Function { name: name.to_string(), args, return_type: None }
    }

    pub fn typed_call(name: &str, args: Vec<ScalarExpr>, return_type: RelType) -> Self {
        ScalarExpr::Function { name: name.to_string(), args, return_type: Some(return_type) }
    }

    pub fn cast(target: ScalarExpr, to: RelType) -> Self {
        ScalarExpr::Cast { target: Box::new(target), to }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, ScalarExpr::WildCard)
    }
}

impl ProjectItem {
    pub fn new(expression: ScalarExpr) -> Self {
        Self { expression, alias: None }
    }

    pub fn aliased(expression: ScalarExpr, alias: &str) -> Self {
        Self { expression, alias: Some(alias.to_string()) }
    }

    pub fn wildcard() -> Self {
        Self::new(ScalarExpr::WildCard)
    }
}

impl From<ScalarExpr> for ProjectItem {
    fn from(expression: ScalarExpr) -> Self {
        ProjectItem::new(expression)
    }
}

impl fmt::Display for ScalarExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarExpr::Column { name } => write!(f, "{}", name),
            ScalarExpr::FieldAccess { target, field } => write!(f, "{}.{}", target, field),
            ScalarExpr::Item { target, key } => write!(f, "{}[{}]", target, key),
            ScalarExpr::Literal { value } => write!(f, "{}", value),
            ScalarExpr::Function { name, args, .. } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            ScalarExpr::Cast { target, to } => write!(f, "CAST({} AS {})", target, to.kind),
            ScalarExpr::WildCard => write!(f, "*"),
        }
    }
}

impl fmt::Debug for ScalarExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarExpr::Column { .. } => write!(f, "Column({})", self),
            ScalarExpr::FieldAccess { .. } => write!(f, "FieldAccess({})", self),
            ScalarExpr::Item { .. } => write!(f, "Item({})", self),
            ScalarExpr::Literal { value } => write!(f, "Literal({:?})", value),
            ScalarExpr::Function { .. } => write!(f, "Function({})", self),
            ScalarExpr::Cast { .. } => write!(f, "Cast({})", self),
            ScalarExpr::WildCard => write!(f, "WildCard(*)"),
        }
    }
}
