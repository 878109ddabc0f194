use serde::Deserialize;
use std::fmt;

use crate::{catalog::RelType, plan::ScalarExpr};

/// An aggregate call computed by an `Aggregate` node.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Deserialize)]
pub struct AggregateCall {
    pub function: String,
    #[serde(default)]
    pub args: Vec<ScalarExpr>,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub alias: Option<String>,
    /// Result type declared by the compiler, used for functions without a
    /// builtin typing rule.
    #[serde(default)]
    pub return_type: Option<RelType>,
    /// Position of the call in the SELECT list it was written in. Unaliased
    /// calls are default-named after it rather than after their slot in the
    /// aggregate output.
    #[serde(default)]
    pub ordinal: Option<usize>,
}

impl AggregateCall {
    pub fn new(function: &str, args: Vec<ScalarExpr>) -> Self {
        Self {
            function: function.to_string(),
            args,
            distinct: false,
            alias: None,
            return_type: None,
            ordinal: None,
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn with_return_type(mut self, return_type: RelType) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = Some(ordinal);
        self
    }

    /// Lowercased function name used for builtin dispatch.
    pub fn normalized_name(&self) -> String {
        self.function.to_ascii_lowercase()
    }
}

impl fmt::Display for AggregateCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
