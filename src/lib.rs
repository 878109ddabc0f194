pub mod catalog;
pub use catalog::{
    BaseColumn, CatalogCommon, CatalogEntry, CatalogError, CatalogProvider, InMemoryCatalog, RelField, RelType,
    RelTypeKind,
};

pub mod plan;
pub use plan::{AggregateCall, LateralView, Literal, ProjectItem, RelNode, ScalarExpr, SetOpKind};

pub mod schema;
pub use schema::{LogicalType, PrimitiveKind, SchemaBuilder, SchemaError, SchemaField, SchemaRecord, SchemaText};

pub mod converter;
pub use converter::{ConverterConfig, ViewSchemaConverter};
