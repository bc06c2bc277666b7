use crate::config::TranslatorOptions;
use crate::error::WeaveResult;
use crate::schema::{FieldDefinition, Identity, IndexDefinition, LogicalType, TableDefinition};
use crate::transpiler::ddl::{self, quote_literal};
use crate::transpiler::traits::SqlTranslator;

#[derive(Debug, Clone, Default)]
pub struct MysqlTranslator {
    options: TranslatorOptions,
}

impl MysqlTranslator {
    pub fn new(options: TranslatorOptions) -> Self {
        Self { options }
    }

    /// Run `statement` only when `probe` (a COUNT query) returns zero, or non-zero
    /// when `when_present` is set. MySQL has no conditional DDL, so the statement
    /// is chosen into a variable and executed as a prepared statement.
    fn guarded(&self, probe: &str, statement: &str, when_present: bool) -> String {
        let test = if when_present { "> 0" } else { "= 0" };
        format!(
            "SET @sqlweave_ddl = IF(({}) {}, {}, 'SELECT 1'); PREPARE sqlweave_stmt FROM @sqlweave_ddl; EXECUTE sqlweave_stmt; DEALLOCATE PREPARE sqlweave_stmt",
            probe,
            test,
            quote_literal(statement)
        )
    }
}

impl SqlTranslator for MysqlTranslator {
    fn name(&self) -> &'static str {
        "MySql"
    }

    fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn bool_literal(&self, value: bool) -> String {
        if value { "1" } else { "0" }.to_string()
    }

    fn string_concat(&self, lhs: &str, rhs: &str) -> String {
        format!("CONCAT({}, {})", lhs, rhs)
    }

    fn null_function(&self) -> &'static str {
        "IFNULL"
    }

    fn length_function(&self) -> &'static str {
        "CHAR_LENGTH"
    }

    fn exists(&self, sql: &str) -> String {
        format!("SELECT EXISTS({})", sql)
    }

    fn type_name(&self, ty: LogicalType, size: u32, precision: u32, casting: bool) -> String {
        if casting {
            return match ty {
                LogicalType::Boolean | LogicalType::Short | LogicalType::Integer | LogicalType::Long => {
                    "SIGNED".into()
                }
                LogicalType::Float | LogicalType::Double => "DOUBLE".into(),
                LogicalType::Decimal => format!("DECIMAL({}, {})", ddl::decimal_digits(size), precision),
                LogicalType::String if size > 0 => format!("CHAR({})", size),
                LogicalType::String => "CHAR".into(),
                LogicalType::DateTime => "DATETIME".into(),
                LogicalType::Guid => "CHAR(36)".into(),
                LogicalType::Binary => "BINARY".into(),
            };
        }

        match ty {
            LogicalType::Boolean => "TINYINT(1)".into(),
            LogicalType::Short => "SMALLINT".into(),
            LogicalType::Integer => "INT".into(),
            LogicalType::Long => "BIGINT".into(),
            LogicalType::Float => "FLOAT".into(),
            LogicalType::Double => "DOUBLE".into(),
            LogicalType::String if size == 0 => "LONGTEXT".into(),
            LogicalType::DateTime => "DATETIME".into(),
            LogicalType::Binary if size == 0 => "LONGBLOB".into(),
            _ => ddl::ansi_type_name(ty, size, precision, casting),
        }
    }

    fn identity_clause(&self, _identity: &Identity) -> Option<String> {
        Some("AUTO_INCREMENT".into())
    }

    fn table_options(&self, table: &TableDefinition) -> String {
        match table.identity_field().and_then(|f| f.identity) {
            Some(identity) if identity.start != 1 => format!(" AUTO_INCREMENT={}", identity.start),
            _ => String::new(),
        }
    }

    fn create_column_if_not_exists(&self, table: &TableDefinition, field: &FieldDefinition) -> WeaveResult<String> {
        let probe = self.column_exists(table.name(), &field.name)?;
        Ok(self.guarded(&probe, &self.create_column(table, field)?, false))
    }

    fn drop_column_if_exists(&self, table: &str, column: &str) -> WeaveResult<String> {
        let probe = self.column_exists(table, column)?;
        Ok(self.guarded(&probe, &self.drop_column(table, column)?, true))
    }

    fn create_index_if_not_exists(&self, table: &TableDefinition, index: &IndexDefinition) -> WeaveResult<String> {
        let name = ddl::index_name(self, table, index);
        let probe = self.index_exists(table.name(), &name)?;
        Ok(self.guarded(&probe, &self.create_index(table, index)?, false))
    }

    fn drop_index(&self, table: &str, index: &str) -> WeaveResult<String> {
        Ok(format!(
            "DROP INDEX {} ON {}",
            self.quote_identifier(index),
            self.table_name(table)
        ))
    }

    fn drop_index_if_exists(&self, table: &str, index: &str) -> WeaveResult<String> {
        let probe = self.index_exists(table, index)?;
        Ok(self.guarded(&probe, &self.drop_index(table, index)?, true))
    }

    fn create_foreign_key_if_not_exists(&self, table: &TableDefinition, field: &FieldDefinition) -> WeaveResult<String> {
        let name = ddl::foreign_key_name(self, table, field)?;
        let probe = self.foreign_key_exists(table.name(), &name)?;
        Ok(self.guarded(&probe, &self.create_foreign_key(table, field)?, false))
    }

    fn drop_foreign_key(&self, table: &str, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "ALTER TABLE {} DROP FOREIGN KEY {}",
            self.table_name(table),
            self.quote_identifier(name)
        ))
    }

    fn drop_foreign_key_if_exists(&self, table: &str, name: &str) -> WeaveResult<String> {
        let probe = self.foreign_key_exists(table, name)?;
        Ok(self.guarded(&probe, &self.drop_foreign_key(table, name)?, true))
    }

    fn table_exists(&self, table: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = DATABASE() AND table_name = {}",
            quote_literal(table)
        ))
    }

    fn column_exists(&self, table: &str, column: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM information_schema.columns WHERE table_schema = DATABASE() AND table_name = {} AND column_name = {}",
            quote_literal(table),
            quote_literal(column)
        ))
    }

    fn index_exists(&self, table: &str, index: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM information_schema.statistics WHERE table_schema = DATABASE() AND table_name = {} AND index_name = {}",
            quote_literal(table),
            quote_literal(index)
        ))
    }

    fn foreign_key_exists(&self, table: &str, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM information_schema.table_constraints WHERE constraint_schema = DATABASE() AND constraint_type = 'FOREIGN KEY' AND table_name = {} AND constraint_name = {}",
            quote_literal(table),
            quote_literal(name)
        ))
    }

    fn returning_identity(&self, insert: &str, _column: &str) -> Option<String> {
        Some(format!("{}; SELECT LAST_INSERT_ID()", insert))
    }
}
