use crate::config::TranslatorOptions;
use crate::error::{WeaveError, WeaveResult};
use crate::schema::{FieldDefinition, LogicalType, TableDefinition};
use crate::transpiler::ddl::{self, quote_literal};
use crate::transpiler::traits::SqlTranslator;

#[derive(Debug, Clone, Default)]
pub struct PostgresTranslator {
    options: TranslatorOptions,
}

impl PostgresTranslator {
    pub fn new(options: TranslatorOptions) -> Self {
        Self { options }
    }
}

impl SqlTranslator for PostgresTranslator {
    fn name(&self) -> &'static str {
        "Postgres"
    }

    fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn exists(&self, sql: &str) -> String {
        format!("SELECT EXISTS({})", sql)
    }

    fn type_name(&self, ty: LogicalType, size: u32, precision: u32, casting: bool) -> String {
        match ty {
            LogicalType::Decimal => format!("NUMERIC({}, {})", ddl::decimal_digits(size), precision),
            LogicalType::Guid => "UUID".into(),
            LogicalType::Binary => "BYTEA".into(),
            LogicalType::String if size == 0 => "TEXT".into(),
            _ => ddl::ansi_type_name(ty, size, precision, casting),
        }
    }

    /// No native IF NOT EXISTS for constraints: probe pg_constraint in a DO block.
    fn create_foreign_key_if_not_exists(&self, table: &TableDefinition, field: &FieldDefinition) -> WeaveResult<String> {
        let name = ddl::foreign_key_name(self, table, field)?;
        let statement = ddl::add_foreign_key(self, table, field)?;
        Ok(format!(
            "DO $$ BEGIN IF NOT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = {}) THEN {}; END IF; END $$",
            quote_literal(&name),
            statement
        ))
    }

    fn create_database_if_not_exists(&self, _name: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "CREATE DATABASE IF NOT EXISTS"))
    }

    fn database_exists(&self, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM pg_database WHERE datname = {}",
            quote_literal(name)
        ))
    }

    fn index_exists(&self, table: &str, index: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM pg_indexes WHERE tablename = {} AND indexname = {}",
            quote_literal(table),
            quote_literal(index)
        ))
    }

    fn returning_identity(&self, insert: &str, column: &str) -> Option<String> {
        Some(format!("{} RETURNING {}", insert, self.quote_identifier(column)))
    }
}
