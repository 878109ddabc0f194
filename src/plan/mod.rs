pub mod literal;
pub use literal::*;

pub mod scalar_expr;
pub use scalar_expr::*;

pub mod aggregate_call;
pub use aggregate_call::*;

pub mod lateral_view;
pub use lateral_view::*;

pub mod rel_node;
pub use rel_node::*;
