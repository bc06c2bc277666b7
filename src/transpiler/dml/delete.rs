//! DELETE SQL generation.

use crate::ast::Value;
use crate::error::WeaveResult;
use crate::schema::TableDefinition;
use crate::transpiler::{Parameters, SqlTranslator};

pub fn build_delete_by_id(
    translator: &dyn SqlTranslator,
    table: &TableDefinition,
    id: impl Into<Value>,
) -> WeaveResult<(String, Parameters)> {
    let mut params = translator.new_parameters();
    let predicate = super::id_predicate(translator, table, &mut params, id.into())?;
    let sql = format!(
        "DELETE FROM {} WHERE {}",
        translator.table_name(table.name()),
        predicate
    );
    Ok((sql, params))
}
