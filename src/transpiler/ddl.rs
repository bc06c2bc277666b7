//! Shared DDL planning: naming rules and statement skeletons used by the
//! translator defaults and the dialect overrides.

use tracing::{debug, warn};

use super::traits::SqlTranslator;
use crate::error::{WeaveError, WeaveResult};
use crate::schema::{FieldDefinition, IndexDefinition, LogicalType, TableDefinition};

/// A DDL operation, used to classify engine error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DdlOp {
    CreateTable,
    DropTable,
    CreateSequence,
    DropSequence,
    CreateTrigger,
    CreateColumn,
    DropColumn,
    CreateIndex,
    DropIndex,
    CreateForeignKey,
    DropForeignKey,
}

/// SQL string literal with embedded quotes doubled.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Total digits of a decimal column; zero selects the default of 18.
pub(crate) fn decimal_digits(size: u32) -> u32 {
    if size == 0 { 18 } else { size }
}

/// Baseline type keywords.
pub fn ansi_type_name(ty: LogicalType, size: u32, precision: u32, casting: bool) -> String {
    match ty {
        LogicalType::Boolean => "BOOLEAN".into(),
        LogicalType::Short => "SMALLINT".into(),
        LogicalType::Integer => "INTEGER".into(),
        LogicalType::Long => "BIGINT".into(),
        LogicalType::Float => "REAL".into(),
        LogicalType::Double => "DOUBLE PRECISION".into(),
        LogicalType::Decimal => format!("DECIMAL({}, {})", decimal_digits(size), precision),
        LogicalType::String if size > 0 => format!("VARCHAR({})", size),
        LogicalType::String if casting => "VARCHAR".into(),
        LogicalType::String => "TEXT".into(),
        LogicalType::DateTime => "TIMESTAMP".into(),
        LogicalType::Guid => "CHAR(36)".into(),
        LogicalType::Binary if size > 0 => format!("VARBINARY({})", size),
        LogicalType::Binary => "BLOB".into(),
    }
}

/// Cut a synthesized constraint name to `max_len` characters. Zero disables the limit.
pub fn constraint_name(name: String, max_len: usize) -> String {
    if max_len == 0 || name.chars().count() <= max_len {
        return name;
    }
    let truncated: String = name.chars().take(max_len).collect();
    warn!(original = %name, truncated = %truncated, "constraint name truncated");
    truncated
}

/// `FK_<table>_<column>_<refTable>_<refColumn>` unless the reference names its constraint.
pub fn foreign_key_name<T: SqlTranslator + ?Sized>(
    translator: &T,
    table: &TableDefinition,
    field: &FieldDefinition,
) -> WeaveResult<String> {
    let reference = field.reference.as_ref().ok_or_else(|| {
        WeaveError::InvalidSchema(format!(
            "column '{}.{}' has no foreign key reference",
            table.name(),
            field.name
        ))
    })?;

    Ok(match &reference.constraint {
        Some(name) => name.clone(),
        None => constraint_name(
            format!(
                "FK_{}_{}_{}_{}",
                table.name(),
                field.name,
                reference.table,
                reference.column
            ),
            translator.options().max_constraint_name_len,
        ),
    })
}

/// `IX_<table>_<col1>_<col2>...` unless the index is explicitly named.
pub fn index_name<T: SqlTranslator + ?Sized>(
    translator: &T,
    table: &TableDefinition,
    index: &IndexDefinition,
) -> String {
    match &index.name {
        Some(name) => name.clone(),
        None => constraint_name(
            format!("IX_{}_{}", table.name(), index.columns.join("_")),
            translator.options().max_constraint_name_len,
        ),
    }
}

/// `<table> (\n    <columns>\n)<options>`
pub fn table_body<T: SqlTranslator + ?Sized>(translator: &T, table: &TableDefinition) -> String {
    let mut lines: Vec<String> = table
        .fields()
        .iter()
        .map(|f| translator.column_definition(table, f))
        .collect();

    let keys: Vec<String> = table
        .primary_keys()
        .map(|f| translator.quote_identifier(&f.name))
        .collect();
    if keys.len() > 1 {
        lines.push(format!("PRIMARY KEY ({})", keys.join(", ")));
    }

    format!(
        "{} (\n    {}\n){}",
        translator.table_name(table.name()),
        lines.join(",\n    "),
        translator.table_options(table)
    )
}

/// CREATE TABLE followed by one statement per index and per foreign key.
pub fn create_table<T: SqlTranslator + ?Sized>(
    translator: &T,
    table: &TableDefinition,
    if_not_exists: bool,
) -> WeaveResult<Vec<String>> {
    let mut statements = vec![translator.create_table_statement(table, if_not_exists)?];

    for index in table.indexes() {
        statements.push(if if_not_exists {
            translator.create_index_if_not_exists(table, &index)?
        } else {
            translator.create_index(table, &index)?
        });
    }

    if !translator.inline_foreign_keys() {
        for field in table.references() {
            statements.push(if if_not_exists {
                translator.create_foreign_key_if_not_exists(table, field)?
            } else {
                translator.create_foreign_key(table, field)?
            });
        }
    }

    debug!(
        dialect = translator.name(),
        table = table.name(),
        statements = statements.len(),
        if_not_exists,
        "planned CREATE TABLE"
    );
    Ok(statements)
}

pub fn create_index<T: SqlTranslator + ?Sized>(
    translator: &T,
    table: &TableDefinition,
    index: &IndexDefinition,
    if_not_exists: bool,
) -> String {
    let columns: Vec<String> = index
        .columns
        .iter()
        .map(|c| translator.quote_identifier(c))
        .collect();
    format!(
        "CREATE {}INDEX {}{} ON {} ({})",
        if index.unique { "UNIQUE " } else { "" },
        if if_not_exists { "IF NOT EXISTS " } else { "" },
        translator.quote_identifier(&index_name(translator, table, index)),
        translator.table_name(table.name()),
        columns.join(", ")
    )
}

pub fn add_foreign_key<T: SqlTranslator + ?Sized>(
    translator: &T,
    table: &TableDefinition,
    field: &FieldDefinition,
) -> WeaveResult<String> {
    let name = foreign_key_name(translator, table, field)?;
    let Some(reference) = &field.reference else {
        return Err(WeaveError::InvalidSchema(format!(
            "column '{}.{}' has no foreign key reference",
            table.name(),
            field.name
        )));
    };
    Ok(format!(
        "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
        translator.table_name(table.name()),
        translator.quote_identifier(&name),
        translator.quote_identifier(&field.name),
        translator.table_name(&reference.table),
        translator.quote_identifier(&reference.column)
    ))
}

/// Shorthand for the field lookup done by every single-column DDL helper.
pub(crate) fn require_field<'a>(table: &'a TableDefinition, column: &str) -> WeaveResult<&'a FieldDefinition> {
    table.field(column).ok_or_else(|| {
        WeaveError::InvalidSchema(format!("table '{}' has no column '{}'", table.name(), column))
    })
}
