//! SELECT-by-id SQL generation.

use crate::ast::Value;
use crate::error::WeaveResult;
use crate::schema::TableDefinition;
use crate::transpiler::{Parameters, SqlTranslator};

/// Every column of the row whose primary key equals `id`.
pub fn build_select_by_id(
    translator: &dyn SqlTranslator,
    table: &TableDefinition,
    id: impl Into<Value>,
) -> WeaveResult<(String, Parameters)> {
    let mut params = translator.new_parameters();
    let predicate = super::id_predicate(translator, table, &mut params, id.into())?;
    let columns: Vec<String> = table
        .fields()
        .iter()
        .map(|f| translator.column_ref(table.name(), &f.name))
        .collect();
    let sql = format!(
        "SELECT {} FROM {} WHERE {}",
        columns.join(", "),
        translator.selectable_table(table.name()),
        predicate
    );
    Ok((sql, params))
}
