//! Identity-based statements over a single table: insert a row, and
//! select, update or delete one by its primary key.

pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

pub use delete::build_delete_by_id;
pub use insert::build_insert;
pub use select::build_select_by_id;
pub use update::build_update_by_id;

use crate::ast::{BinaryOp, Value};
use crate::error::{WeaveError, WeaveResult};
use crate::schema::{FieldDefinition, TableDefinition};
use crate::transpiler::{Parameters, SqlTranslator};

/// The single primary key column, required by every by-id statement.
fn id_field(table: &TableDefinition) -> WeaveResult<&FieldDefinition> {
    table
        .id_field()
        .ok_or_else(|| WeaveError::MissingPrimaryKey(table.name().to_string()))
}

/// `(<table>.<id> = <placeholder>)`
fn id_predicate(
    translator: &dyn SqlTranslator,
    table: &TableDefinition,
    params: &mut Parameters,
    id: Value,
) -> WeaveResult<String> {
    let field = id_field(table)?;
    let column = translator.column_ref(table.name(), &field.name);
    let key = params.add(id);
    Ok(translator.format_binary(BinaryOp::Eq, &column, &key))
}
