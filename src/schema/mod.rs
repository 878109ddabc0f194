pub mod logical_type;
pub use logical_type::*;

pub mod schema_field;
pub use schema_field::*;

pub mod schema_error;
pub use schema_error::*;

pub mod type_mapper;
pub use type_mapper::*;

pub mod type_widening;
pub use type_widening::*;

pub mod naming_context;
pub use naming_context::*;

pub mod field_namer;
pub use field_namer::*;

pub mod type_inference;
pub use type_inference::*;

pub mod aggregate_typer;
pub use aggregate_typer::*;

pub mod schema_merger;
pub use schema_merger::*;

pub mod schema_builder;
pub use schema_builder::*;

pub mod schema_text;
pub use schema_text::*;
