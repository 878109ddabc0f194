use crate::{
    catalog::{BaseColumn, CatalogEntry, CatalogProvider},
    plan::{AggregateCall, LateralView, ProjectItem, RelNode, SetOpKind},
    schema::{
        AggregateTyper, FieldNamer, LogicalType, NamingContext, SchemaError, SchemaField, SchemaMerger,
        SchemaRecord, TypeInference, TypeMapper,
    },
};

/// Derives the output row shape of a relational plan, bottom up.
///
/// One builder serves one derivation: it owns the naming state and the
/// stack of views currently being expanded.
pub struct SchemaBuilder<'a> {
    catalog: &'a dyn CatalogProvider,
    naming: NamingContext,
    view_stack: Vec<(String, String)>,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(catalog: &'a dyn CatalogProvider) -> Self {
        Self::with_naming(catalog, NamingContext::default())
    }

    pub fn with_naming(catalog: &'a dyn CatalogProvider, naming: NamingContext) -> Self {
        Self { catalog, naming, view_stack: Vec::new() }
    }

    pub fn naming(&self) -> &NamingContext {
        &self.naming
    }

    pub fn build(&mut self, node: &RelNode) -> Result<SchemaRecord, SchemaError> {
        tracing::trace!(node = node.kind_name(), "building schema");

        let record = match node {
            RelNode::Scan { namespace, name } => self.scan(namespace, name)?,
            RelNode::Project { input, items } => {
                let input = self.build(input)?;
                self.project(&input, items)?
            }
            // predicates select rows, they never change the shape
            RelNode::Filter { input, .. } => self.build(input)?,
            RelNode::Aggregate { input, group_keys, aggs } => {
                let input = self.build(input)?;
                self.aggregate(&input, group_keys, aggs)?
            }
            RelNode::SetOp { kind, inputs } => self.set_op(*kind, inputs)?,
            RelNode::Correlate(view) => self.lateral(view)?,
            RelNode::SubQuery { input, alias, items } => {
                let inner = self.build(input)?;
                let inner = match alias {
                    Some(alias) => inner.renamed(alias),
                    None => inner,
                };
                self.project(&inner, items)?
            }
            RelNode::Sort { input, .. } | RelNode::Limit { input, .. } => self.build(input)?,
        };

        tracing::trace!(node = node.kind_name(), fields = record.len(), "schema built");
        Ok(record)
    }

    /// Schema of a view plan registered as `namespace.name`.
    pub fn build_view(&mut self, namespace: &str, name: &str, plan: &RelNode) -> Result<SchemaRecord, SchemaError> {
        let key = (namespace.to_ascii_lowercase(), name.to_ascii_lowercase());
        if self.view_stack.contains(&key) {
            return Err(SchemaError::unresolvable(namespace, name, "view references itself"));
        }

        self.view_stack.push(key);
        let result = self.build(plan);
        self.view_stack.pop();
        Ok(result?.renamed(name))
    }

    pub fn table_schema(name: &str, columns: &[BaseColumn]) -> Result<SchemaRecord, SchemaError> {
        Ok(SchemaRecord::new(name, TypeMapper::map_columns(columns)?))
    }

    fn scan(&mut self, namespace: &str, name: &str) -> Result<SchemaRecord, SchemaError> {
        let entry = self
            .catalog
            .lookup(namespace, name)
            .map_err(|error| SchemaError::unresolvable(namespace, name, &error.to_string()))?;
        match entry {
            Some(CatalogEntry::Table { columns }) => Self::table_schema(name, &columns),
            Some(CatalogEntry::View { plan }) => self.build_view(namespace, name, &plan),
            None => Err(SchemaError::unresolvable(namespace, name, "not found in catalog")),
        }
    }

    fn project(&mut self, input: &SchemaRecord, items: &[ProjectItem]) -> Result<SchemaRecord, SchemaError> {
        self.naming.begin_list();
        let mut fields = Vec::with_capacity(items.len());

        for item in items {
            if item.expression.is_wildcard() {
                for field in &input.fields {
                    fields.push(field.clone());
                    self.naming.advance();
                }
                continue;
            }

            if AggregateTyper::contains_aggregate(&item.expression) {
                return Err(SchemaError::UnsupportedConstruct(format!(
                    "aggregate call `{}` outside of an aggregate node", item.expression
                )));
            }

            let ty = TypeInference::infer_scalar(&item.expression, input)?;
            let name = FieldNamer::name(&item.expression, item.alias.as_deref(), input, &mut self.naming)?;
            let doc = TypeInference::source_doc(&item.expression, input);
            fields.push(SchemaField::new(&name, ty).with_doc(doc));
            self.naming.advance();
        }

        Ok(SchemaRecord::new(&input.name, fields))
    }

    fn aggregate(
        &mut self,
        input: &SchemaRecord,
        group_keys: &[String],
        aggs: &[AggregateCall],
    ) -> Result<SchemaRecord, SchemaError> {
        // keys follow the input's column order, which is the select order
        let mut positions = group_keys
            .iter()
            .map(|key| input.position_of(key))
            .collect::<Result<Vec<_>, _>>()?;
        positions.sort_unstable();
        positions.dedup();

        self.naming.begin_list();
        let mut fields = Vec::with_capacity(positions.len() + aggs.len());
        for position in positions {
            fields.push(input.fields[position].clone());
            self.naming.advance();
        }

        let grouped = !group_keys.is_empty();
        for call in aggs {
            let ty = AggregateTyper::infer(call, input, grouped)?;
            let name = FieldNamer::name_aggregate(call, &mut self.naming);
            fields.push(SchemaField::new(&name, ty));
            self.naming.advance();
        }

        Ok(SchemaRecord::new(&input.name, fields))
    }

    fn set_op(&mut self, kind: SetOpKind, inputs: &[RelNode]) -> Result<SchemaRecord, SchemaError> {
        if inputs.len() < 2 {
            return Err(SchemaError::UnsupportedConstruct(format!(
                "{:?} with {} branch(es), at least two are required", kind, inputs.len()
            )));
        }

        let mut branches = Vec::with_capacity(inputs.len());
        for branch in inputs {
            branches.push(self.build(branch)?);
        }
        tracing::trace!(?kind, branches = branches.len(), "merging set operation");
        SchemaMerger::merge(&branches)
    }

    fn lateral(&mut self, view: &LateralView) -> Result<SchemaRecord, SchemaError> {
        let input = self.build(view.input())?;

        let source_ty = TypeInference::infer_scalar(view.source(), &input)?;
        let LogicalType::Array(element) = source_ty.non_null() else {
            return Err(SchemaError::UnsupportedConstruct(format!(
                "lateral view source `{}` has type {}, expected an array", view.source(), source_ty
            )));
        };

        // the element comes from the resolved source; the declared one must agree
        let declared = TypeMapper::map(view.element_type())?;
        if declared.non_null() != element.non_null() {
            return Err(SchemaError::UnsupportedConstruct(format!(
                "lateral view over `{}` declares element type {}, but the source holds {}",
                view.source(), declared, element
            )));
        }

        let element = (**element).clone();
        let ty = if view.is_outer() { LogicalType::nullable(element) } else { element };

        let mut fields = input.fields;
        for alias in view.aliases() {
            fields.push(SchemaField::new(alias, ty.clone()));
        }
        Ok(SchemaRecord::new(&input.name, fields))
    }
}
