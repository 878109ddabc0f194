use serde::Deserialize;

use crate::{
    catalog::{RelType, RelTypeKind},
    plan::{RelNode, ScalarExpr},
    schema::SchemaError,
};

/// Correlated lateral expansion (`LATERAL VIEW [OUTER] explode(expr) t AS ...`).
///
/// Only array-valued sources can be represented: the constructor is the
/// single way in, for code and for deserialized plans alike, and it rejects
/// map-valued sources with `UnsupportedConstruct`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "LateralViewDef")]
pub struct LateralView {
    input: Box<RelNode>,
    source: ScalarExpr,
    element_type: RelType,
    aliases: Vec<String>,
    outer: bool,
}

#[derive(Deserialize)]
struct LateralViewDef {
    input: Box<RelNode>,
    source: ScalarExpr,
    source_type: RelType,
    aliases: Vec<String>,
    #[serde(default)]
    outer: bool,
}

impl LateralView {
    pub fn explode(
        input: RelNode,
        source: ScalarExpr,
        source_type: RelType,
        aliases: Vec<String>,
        outer: bool,
    ) -> Result<Self, SchemaError> {
        if aliases.is_empty() {
            return Err(SchemaError::UnsupportedConstruct(format!(
                "lateral view over `{}` declares no output columns", source
            )));
        }

        let element_type = match &source_type.kind {
            RelTypeKind::Array { element } => element.as_ref().clone(),
            RelTypeKind::Map { .. } => {
                return Err(SchemaError::UnsupportedConstruct(format!(
                    "lateral view over map-valued expression `{}`", source
                )));
            }
            other => {
                return Err(SchemaError::UnsupportedConstruct(format!(
                    "lateral view source `{}` is not an array: {}", source, other
                )));
            }
        };

        Ok(Self {
            input: Box::new(input),
            source,
            element_type,
            aliases,
            outer,
        })
    }

    pub fn input(&self) -> &RelNode {
        &self.input
    }

    pub fn source(&self) -> &ScalarExpr {
        &self.source
    }

    /// Element type of the exploded array, as declared by the compiler.
    pub fn element_type(&self) -> &RelType {
        &self.element_type
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn is_outer(&self) -> bool {
        self.outer
    }
}

impl TryFrom<LateralViewDef> for LateralView {
    type Error = SchemaError;

    fn try_from(def: LateralViewDef) -> Result<Self, Self::Error> {
        LateralView::explode(*def.input, def.source, def.source_type, def.aliases, def.outer)
    }
}
