use crate::config::TranslatorOptions;
use crate::error::{WeaveError, WeaveResult};
use crate::schema::{FieldDefinition, LogicalType, TableDefinition};
use crate::transpiler::ddl::{self, quote_literal};
use crate::transpiler::traits::SqlTranslator;

/// SQLite: the database is the file, ALTER TABLE is minimal and foreign keys
/// only exist inline in CREATE TABLE.
#[derive(Debug, Clone, Default)]
pub struct SqliteTranslator {
    options: TranslatorOptions,
}

impl SqliteTranslator {
    pub fn new(options: TranslatorOptions) -> Self {
        Self { options }
    }
}

/// Placeholder for operations SQLite performs implicitly.
const NO_OP: &str = "SELECT 1";

impl SqlTranslator for SqliteTranslator {
    fn name(&self) -> &'static str {
        "Sqlite"
    }

    fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn bool_literal(&self, value: bool) -> String {
        if value { "1" } else { "0" }.to_string()
    }

    fn null_function(&self) -> &'static str {
        "IFNULL"
    }

    fn exists(&self, sql: &str) -> String {
        format!("SELECT EXISTS({})", sql)
    }

    fn type_name(&self, ty: LogicalType, _size: u32, _precision: u32, _casting: bool) -> String {
        match ty {
            LogicalType::Boolean | LogicalType::Short | LogicalType::Integer | LogicalType::Long => {
                "INTEGER".into()
            }
            LogicalType::Float | LogicalType::Double => "REAL".into(),
            LogicalType::Decimal => "NUMERIC".into(),
            LogicalType::String | LogicalType::Guid | LogicalType::DateTime => {
                "TEXT".into()
            }
            LogicalType::Binary => "BLOB".into(),
        }
    }

    /// Identity is only expressible as `INTEGER PRIMARY KEY AUTOINCREMENT`,
    /// and references are declared inline.
    fn column_definition(&self, table: &TableDefinition, field: &FieldDefinition) -> String {
        let mut def = format!(
            "{} {}",
            self.quote_identifier(&field.name),
            self.type_name(field.ty, field.size, field.precision, false)
        );
        def.push_str(if field.nullable { " NULL" } else { " NOT NULL" });
        if field.primary_key && table.primary_keys().count() == 1 {
            def.push_str(" PRIMARY KEY");
            if field.is_identity() {
                def.push_str(" AUTOINCREMENT");
            }
        }
        if let Some(reference) = &field.reference {
            def.push_str(&format!(
                " REFERENCES {} ({})",
                self.table_name(&reference.table),
                self.quote_identifier(&reference.column)
            ));
        }
        def
    }

    fn inline_foreign_keys(&self) -> bool {
        true
    }

    fn create_table_statement(&self, table: &TableDefinition, if_not_exists: bool) -> WeaveResult<String> {
        if let Some(identity) = table.identity_field() {
            if !identity.primary_key || table.primary_keys().count() != 1 {
                return Err(WeaveError::unsupported_feature(
                    self.name(),
                    "identity on a column that is not the sole primary key",
                ));
            }
        }
        let guard = if if_not_exists { "IF NOT EXISTS " } else { "" };
        Ok(format!("CREATE TABLE {}{}", guard, ddl::table_body(self, table)))
    }

    fn create_column_if_not_exists(&self, _table: &TableDefinition, _field: &FieldDefinition) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "ADD COLUMN IF NOT EXISTS"))
    }

    fn drop_column(&self, _table: &str, _column: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "DROP COLUMN"))
    }

    fn drop_column_if_exists(&self, _table: &str, _column: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "DROP COLUMN"))
    }

    fn create_foreign_key(&self, _table: &TableDefinition, _field: &FieldDefinition) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "ALTER TABLE ADD CONSTRAINT"))
    }

    fn create_foreign_key_if_not_exists(&self, _table: &TableDefinition, _field: &FieldDefinition) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "ALTER TABLE ADD CONSTRAINT"))
    }

    fn drop_foreign_key(&self, _table: &str, _name: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "ALTER TABLE DROP CONSTRAINT"))
    }

    fn drop_foreign_key_if_exists(&self, _table: &str, _name: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "ALTER TABLE DROP CONSTRAINT"))
    }

    fn create_database(&self, _name: &str) -> WeaveResult<String> {
        Ok(NO_OP.into())
    }

    fn create_database_if_not_exists(&self, _name: &str) -> WeaveResult<String> {
        Ok(NO_OP.into())
    }

    fn drop_database(&self, _name: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "DROP DATABASE"))
    }

    fn drop_database_if_exists(&self, _name: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "DROP DATABASE"))
    }

    fn database_exists(&self, _name: &str) -> WeaveResult<String> {
        Ok(NO_OP.into())
    }

    fn table_exists(&self, table: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = {}",
            quote_literal(table)
        ))
    }

    fn column_exists(&self, _table: &str, _column: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "column introspection"))
    }

    fn index_exists(&self, table: &str, index: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND tbl_name = {} AND name = {}",
            quote_literal(table),
            quote_literal(index)
        ))
    }

    fn foreign_key_exists(&self, _table: &str, _name: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "foreign key introspection"))
    }

    fn returning_identity(&self, insert: &str, _column: &str) -> Option<String> {
        Some(format!("{}; SELECT last_insert_rowid()", insert))
    }
}
