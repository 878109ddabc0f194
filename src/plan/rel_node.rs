use serde::Deserialize;

use crate::{
    catalog::RelType,
    plan::{AggregateCall, LateralView, ProjectItem, ScalarExpr},
    schema::SchemaError,
};

/// Validated logical plan of a view, as produced by the SQL compiler.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RelNode {
    /// Read a catalog object (base table, or another view).
    Scan {
        namespace: String,
        name: String,
    },

    /// Projection in SELECT order, `*` included.
    Project {
        input: Box<RelNode>,
        items: Vec<ProjectItem>,
    },

    /// Row-level filter (WHERE or HAVING depending on position in the tree).
    Filter {
        input: Box<RelNode>,
        predicate: ScalarExpr,
    },

    /// Group-by aggregation. Keys are input column names.
    Aggregate {
        input: Box<RelNode>,
        #[serde(default)]
        group_keys: Vec<String>,
        #[serde(default)]
        aggs: Vec<AggregateCall>,
    },

    /// Positional set operation over two or more branches.
    SetOp {
        kind: SetOpKind,
        inputs: Vec<RelNode>,
    },

    Correlate(LateralView),

    /// Derived table in FROM, re-projected by the enclosing SELECT.
    SubQuery {
        input: Box<RelNode>,
        #[serde(default)]
        alias: Option<String>,
        items: Vec<ProjectItem>,
    },

    Sort {
        input: Box<RelNode>,
        keys: Vec<OrderBy>,
    },

    Limit {
        input: Box<RelNode>,
        #[serde(default)]
        limit: Option<i64>,
        #[serde(default)]
        offset: Option<i64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOpKind {
    UnionAll,
    Union,
    Intersect,
    Except,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct OrderBy {
    pub expr: ScalarExpr,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl RelNode {
    pub fn scan(namespace: &str, name: &str) -> Self {
        RelNode::Scan { namespace: namespace.to_string(), name: name.to_string() }
    }

    pub fn project(self, items: Vec<ProjectItem>) -> Self {
        RelNode::Project { input: Box::new(self), items }
    }

    pub fn filter(self, predicate: ScalarExpr) -> Self {
        RelNode::Filter { input: Box::new(self), predicate }
    }

    pub fn aggregate(self, group_keys: &[&str], aggs: Vec<AggregateCall>) -> Self {
        RelNode::Aggregate {
            input: Box::new(self),
            group_keys: group_keys.iter().map(|key| key.to_string()).collect(),
            aggs,
        }
    }

    pub fn set_op(kind: SetOpKind, inputs: Vec<RelNode>) -> Self {
        RelNode::SetOp { kind, inputs }
    }

    pub fn union_all(inputs: Vec<RelNode>) -> Self {
        RelNode::set_op(SetOpKind::UnionAll, inputs)
    }

    /// Lateral expansion over this node; fails for non-array sources.
    pub fn lateral(
        self,
        source: ScalarExpr,
        source_type: RelType,
        aliases: &[&str],
        outer: bool,
    ) -> Result<Self, SchemaError> {
        let aliases = aliases.iter().map(|alias| alias.to_string()).collect();
        LateralView::explode(self, source, source_type, aliases, outer).map(RelNode::Correlate)
    }

    pub fn sub_query(self, alias: Option<&str>, items: Vec<ProjectItem>) -> Self {
        RelNode::SubQuery {
            input: Box::new(self),
            alias: alias.map(str::to_string),
            items,
        }
    }

    pub fn sort(self, keys: Vec<OrderBy>) -> Self {
        RelNode::Sort { input: Box::new(self), keys }
    }

    pub fn limit(self, limit: Option<i64>, offset: Option<i64>) -> Self {
        RelNode::Limit { input: Box::new(self), limit, offset }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            RelNode::Scan { .. } => "Scan",
            RelNode::Project { .. } => "Project",
            RelNode::Filter { .. } => "Filter",
            RelNode::Aggregate { .. } => "Aggregate",
            RelNode::SetOp { .. } => "SetOp",
            RelNode::Correlate(_) => "Correlate",
            RelNode::SubQuery { .. } => "SubQuery",
            RelNode::Sort { .. } => "Sort",
            RelNode::Limit { .. } => "Limit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RelTypeKind;
    use serde_json::json;

    #[test]
    fn fluent_construction_nests_inputs() {
        let plan = RelNode::scan("default", "t")
            .filter(ScalarExpr::call(">", vec![ScalarExpr::column("id"), ScalarExpr::int(0)]))
            .project(vec![ProjectItem::new(ScalarExpr::column("id"))]);

        match plan {
            RelNode::Project { input, items } => {
                assert_eq!(items.len(), 1);
                match *input {
                    RelNode::Filter { input, .. } => {
                        assert_eq!(*input, RelNode::scan("default", "t"));
                    }
                    other => panic!("expected Filter, got {other:?}"),
                }
            }
            other => panic!("expected Project, got {other:?}"),
        }
    }

    #[test]
    fn deserializes_lateral_view_plan() {
        let value = json!({
            "op": "project",
            "input": {
                "op": "correlate",
                "input": { "op": "scan", "namespace": "default", "name": "basecomplex" },
                "source": { "expr": "column", "name": "Array_Col" },
                "source_type": { "type": "array", "nullable": true, "element": { "type": "string", "nullable": true } },
                "aliases": ["c"],
                "outer": true
            },
            "items": [ { "expression": { "expr": "column", "name": "c" } } ]
        });

        let plan: RelNode = serde_json::from_value(value).unwrap();
        let RelNode::Project { input, .. } = plan else { panic!("expected Project") };
        let RelNode::Correlate(view) = *input else { panic!("expected Correlate") };
        assert!(view.is_outer());
        assert_eq!(view.element_type(), &RelType::nullable(RelTypeKind::String));
        assert_eq!(view.input().kind_name(), "Scan");
    }

    #[test]
    fn lateral_over_map_is_rejected_at_construction() {
        let map_type = RelType::nullable(RelTypeKind::map(
            RelType::not_null(RelTypeKind::String),
            RelType::nullable(RelTypeKind::Integer),
        ));
        let result = RelNode::scan("default", "t").lateral(ScalarExpr::column("m"), map_type, &["k", "v"], false);
        assert!(matches!(result, Err(SchemaError::UnsupportedConstruct(_))));
    }
}
