//! INSERT SQL generation.

use tracing::debug;

use crate::ast::Value;
use crate::error::WeaveResult;
use crate::schema::TableDefinition;
use crate::transpiler::ddl::require_field;
use crate::transpiler::{Parameters, SqlTranslator};

/// Generate an INSERT of `row`. Identity columns are skipped; when the table has
/// one, the statement is extended to yield the generated value.
pub fn build_insert(
    translator: &dyn SqlTranslator,
    table: &TableDefinition,
    row: &[(&str, Value)],
) -> WeaveResult<(String, Parameters)> {
    let mut params = translator.new_parameters();
    let mut columns = Vec::new();
    let mut values = Vec::new();

    for (name, value) in row {
        let field = require_field(table, name)?;
        if field.is_identity() {
            continue;
        }
        columns.push(translator.quote_identifier(&field.name));
        values.push(params.add(value.clone()));
    }

    let target = translator.table_name(table.name());
    let mut sql = if columns.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES", target)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            target,
            columns.join(", "),
            values.join(", ")
        )
    };

    if let Some(identity) = table.identity_field() {
        if let Some(extended) = translator.returning_identity(&sql, &identity.name) {
            sql = extended;
        }
    }

    debug!(dialect = translator.name(), table = table.name(), params = params.len(), "built insert");
    Ok((sql, params))
}
