use crate::{
    plan::{AggregateCall, ScalarExpr},
    schema::{NamingContext, SchemaError, SchemaRecord},
};

pub struct FieldNamer;

impl FieldNamer {
    /// Output name of a projected expression.
    ///
    /// An alias is used verbatim. A plain column keeps the input field's
    /// name as stored in the input (so `id` over a column `Id` yields `Id`),
    /// a field access is named after the accessed field, and anything else
    /// takes the positional default. Defaults are not deduplicated.
    pub fn name(
        expr: &ScalarExpr,
        alias: Option<&str>,
        input: &SchemaRecord,
        ctx: &mut NamingContext,
    ) -> Result<String, SchemaError> {
        if let Some(alias) = alias {
            return Ok(alias.to_string());
        }

        match expr {
            ScalarExpr::Column { name } => Ok(input.resolve(name)?.name.clone()),
            ScalarExpr::FieldAccess { field, .. } => Ok(field.clone()),
            _ => Ok(ctx.default_name()),
        }
    }

    /// Output name of an aggregate call: its alias, else the default for its
    /// SELECT-list ordinal, else the default for its slot in the output.
    pub fn name_aggregate(call: &AggregateCall, ctx: &mut NamingContext) -> String {
        match (&call.alias, call.ordinal) {
            (Some(alias), _) => alias.clone(),
            (None, Some(ordinal)) => ctx.name_at(ordinal),
            (None, None) => ctx.default_name(),
        }
    }
}
