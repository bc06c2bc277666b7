//! UPDATE SQL generation.

use crate::ast::Value;
use crate::error::{WeaveError, WeaveResult};
use crate::schema::TableDefinition;
use crate::transpiler::ddl::require_field;
use crate::transpiler::{Parameters, SqlTranslator};

/// Generate an UPDATE of the row identified by `id`. Key and identity columns in
/// `row` are not assignable and are skipped.
pub fn build_update_by_id(
    translator: &dyn SqlTranslator,
    table: &TableDefinition,
    id: impl Into<Value>,
    row: &[(&str, Value)],
) -> WeaveResult<(String, Parameters)> {
    super::id_field(table)?;
    let mut params = translator.new_parameters();

    let mut assignments = Vec::new();
    for (name, value) in row {
        let field = require_field(table, name)?;
        if field.primary_key || field.is_identity() {
            continue;
        }
        let key = params.add(value.clone());
        assignments.push(format!("{} = {}", translator.quote_identifier(&field.name), key));
    }

    if assignments.is_empty() {
        return Err(WeaveError::InvalidSchema(format!(
            "update of '{}' assigns no columns",
            table.name()
        )));
    }

    let predicate = super::id_predicate(translator, table, &mut params, id.into())?;
    let sql = format!(
        "UPDATE {} SET {} WHERE {}",
        translator.table_name(table.name()),
        assignments.join(", "),
        predicate
    );
    Ok((sql, params))
}
