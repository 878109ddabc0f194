use crate::{
    catalog::{CatalogEntry, CatalogProvider},
    converter::ConverterConfig,
    schema::{NamingContext, SchemaBuilder, SchemaError, SchemaRecord, SchemaText},
};

/// Entry point: resolves a catalog object and derives its output schema.
///
/// The converter holds no mutable state; every call builds with a fresh
/// naming context, so one converter can serve many threads.
pub struct ViewSchemaConverter<'a> {
    catalog: &'a dyn CatalogProvider,
    config: ConverterConfig,
}

impl<'a> ViewSchemaConverter<'a> {
    pub fn new(catalog: &'a dyn CatalogProvider, config: ConverterConfig) -> Self {
        Self { catalog, config }
    }

    pub fn with_default_config(catalog: &'a dyn CatalogProvider) -> Self {
        Self::new(catalog, ConverterConfig::default())
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Schema of `namespace.name`, as a record named `name`.
    pub fn to_schema_record(&self, namespace: &str, name: &str) -> Result<SchemaRecord, SchemaError> {
        let record = self
            .derive(namespace, name)
            .map_err(|error| error.with_origin(namespace, name))?
            .renamed(name);

        let record = if self.config.force_lowercase { record.to_lowercase() } else { record };
        tracing::debug!(namespace, object = name, fields = record.len(), "schema derived");
        Ok(record)
    }

    /// Canonical schema text of `namespace.name`.
    pub fn to_schema(&self, namespace: &str, name: &str) -> Result<String, SchemaError> {
        let record = self.to_schema_record(namespace, name)?;
        let record_namespace = self.config.record_namespace.as_deref().unwrap_or(namespace);
        SchemaText::render(&record, record_namespace).map_err(|error| error.with_origin(namespace, name))
    }

    fn derive(&self, namespace: &str, name: &str) -> Result<SchemaRecord, SchemaError> {
        let entry = self.catalog.lookup(namespace, name).map_err(|error| {
            tracing::debug!(namespace, object = name, %error, "catalog lookup failed");
            SchemaError::unresolvable(namespace, name, &error.to_string())
        })?;
        match entry {
            Some(CatalogEntry::Table { columns }) => {
                tracing::debug!(namespace, object = name, columns = columns.len(), "resolved base table");
                SchemaBuilder::table_schema(name, &columns)
            }
            Some(CatalogEntry::View { plan }) => {
                tracing::debug!(namespace, object = name, root = plan.kind_name(), "resolved view");
                let naming = NamingContext::new(&self.config.default_name_prefix);
                let mut builder = SchemaBuilder::with_naming(self.catalog, naming);
                let record = builder.build_view(namespace, name, &plan)?;
                tracing::trace!(generated = builder.naming().generated(), "default names generated");
                Ok(record)
            }
            None => {
                tracing::debug!(namespace, object = name, "catalog lookup missed");
                Err(SchemaError::unresolvable(namespace, name, "not found in catalog"))
            }
        }
    }
}
