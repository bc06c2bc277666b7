use crate::config::TranslatorOptions;
use crate::error::WeaveResult;
use crate::query::QueryParts;
use crate::schema::{FieldDefinition, Identity, IndexDefinition, LogicalType, TableDefinition};
use crate::transpiler::ddl::{self, quote_literal};
use crate::transpiler::params::Parameters;
use crate::transpiler::traits::SqlTranslator;

#[derive(Debug, Clone, Default)]
pub struct SqlServerTranslator {
    options: TranslatorOptions,
}

impl SqlServerTranslator {
    pub fn new(options: TranslatorOptions) -> Self {
        Self { options }
    }
}

/// Unicode string literal.
fn n(value: &str) -> String {
    format!("N{}", quote_literal(value))
}

impl SqlTranslator for SqlServerTranslator {
    fn name(&self) -> &'static str {
        "SqlServer"
    }

    fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("[{}]", name.replace(']', "]]"))
    }

    fn selectable_table(&self, table: &str) -> String {
        if self.options.sqlserver_nolock {
            format!("{} WITH (NOLOCK)", self.table_name(table))
        } else {
            self.table_name(table)
        }
    }

    fn bool_literal(&self, value: bool) -> String {
        if value { "1" } else { "0" }.to_string()
    }

    fn string_concat(&self, lhs: &str, rhs: &str) -> String {
        format!("({} + {})", lhs, rhs)
    }

    fn null_function(&self) -> &'static str {
        "ISNULL"
    }

    fn length_function(&self) -> &'static str {
        "LEN"
    }

    fn trim(&self, operand: &str) -> String {
        format!("LTRIM(RTRIM({}))", operand)
    }

    fn top(&self, parts: &mut QueryParts, _params: &mut Parameters, n: u64) {
        parts.select_format.top = Some(n);
    }

    fn paginate(&self, parts: &mut QueryParts, _params: &mut Parameters, size: u64, page: u64) {
        let offset = size.saturating_mul(page.saturating_sub(1));
        parts.end_clause = format!("OFFSET {} ROWS FETCH NEXT {} ROWS ONLY", offset, size);
    }

    /// OFFSET ... FETCH is only valid after an ORDER BY.
    fn default_order_by(&self) -> Option<&'static str> {
        Some("(SELECT NULL)")
    }

    fn type_name(&self, ty: LogicalType, size: u32, precision: u32, _casting: bool) -> String {
        match ty {
            LogicalType::Boolean => "BIT".into(),
            LogicalType::Short => "SMALLINT".into(),
            LogicalType::Integer => "INT".into(),
            LogicalType::Long => "BIGINT".into(),
            LogicalType::Float => "REAL".into(),
            LogicalType::Double => "FLOAT".into(),
            LogicalType::Decimal => format!("DECIMAL({}, {})", ddl::decimal_digits(size), precision),
            LogicalType::String if size > 0 => format!("NVARCHAR({})", size),
            LogicalType::String => "NVARCHAR(MAX)".into(),
            LogicalType::DateTime => "DATETIME2".into(),
            LogicalType::Guid => "UNIQUEIDENTIFIER".into(),
            LogicalType::Binary if size > 0 => format!("VARBINARY({})", size),
            LogicalType::Binary => "VARBINARY(MAX)".into(),
        }
    }

    fn identity_clause(&self, identity: &Identity) -> Option<String> {
        Some(format!("IDENTITY({},{})", identity.start, identity.increment))
    }

    fn create_table_statement(&self, table: &TableDefinition, if_not_exists: bool) -> WeaveResult<String> {
        let create = format!("CREATE TABLE {}", ddl::table_body(self, table));
        if !if_not_exists {
            return Ok(create);
        }
        Ok(format!("IF OBJECT_ID({}, N'U') IS NULL\n{}", n(table.name()), create))
    }

    fn drop_table_if_exists(&self, table: &TableDefinition) -> WeaveResult<Vec<String>> {
        Ok(vec![format!(
            "IF OBJECT_ID({}, N'U') IS NOT NULL DROP TABLE {}",
            n(table.name()),
            self.table_name(table.name())
        )])
    }

    fn create_column(&self, table: &TableDefinition, field: &FieldDefinition) -> WeaveResult<String> {
        Ok(format!(
            "ALTER TABLE {} ADD {}",
            self.table_name(table.name()),
            self.column_definition(table, field)
        ))
    }

    fn create_column_if_not_exists(&self, table: &TableDefinition, field: &FieldDefinition) -> WeaveResult<String> {
        Ok(format!(
            "IF COL_LENGTH({}, {}) IS NULL {}",
            n(table.name()),
            n(&field.name),
            self.create_column(table, field)?
        ))
    }

    fn drop_column_if_exists(&self, table: &str, column: &str) -> WeaveResult<String> {
        Ok(format!(
            "IF COL_LENGTH({}, {}) IS NOT NULL {}",
            n(table),
            n(column),
            self.drop_column(table, column)?
        ))
    }

    fn create_index_if_not_exists(&self, table: &TableDefinition, index: &IndexDefinition) -> WeaveResult<String> {
        let name = ddl::index_name(self, table, index);
        Ok(format!(
            "IF NOT EXISTS (SELECT * FROM sys.indexes WHERE name = {} AND object_id = OBJECT_ID({})) {}",
            n(&name),
            n(table.name()),
            self.create_index(table, index)?
        ))
    }

    fn drop_index(&self, table: &str, index: &str) -> WeaveResult<String> {
        Ok(format!(
            "DROP INDEX {} ON {}",
            self.quote_identifier(index),
            self.table_name(table)
        ))
    }

    fn drop_index_if_exists(&self, table: &str, index: &str) -> WeaveResult<String> {
        Ok(format!(
            "IF EXISTS (SELECT * FROM sys.indexes WHERE name = {} AND object_id = OBJECT_ID({})) {}",
            n(index),
            n(table),
            self.drop_index(table, index)?
        ))
    }

    fn create_foreign_key_if_not_exists(&self, table: &TableDefinition, field: &FieldDefinition) -> WeaveResult<String> {
        let name = ddl::foreign_key_name(self, table, field)?;
        Ok(format!(
            "IF OBJECT_ID({}, N'F') IS NULL {}",
            n(&name),
            self.create_foreign_key(table, field)?
        ))
    }

    fn drop_foreign_key_if_exists(&self, table: &str, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "IF OBJECT_ID({}, N'F') IS NOT NULL {}",
            n(name),
            self.drop_foreign_key(table, name)?
        ))
    }

    fn create_database_if_not_exists(&self, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "IF DB_ID({}) IS NULL CREATE DATABASE {}",
            n(name),
            self.quote_identifier(name)
        ))
    }

    fn drop_database_if_exists(&self, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "IF DB_ID({}) IS NOT NULL DROP DATABASE {}",
            n(name),
            self.quote_identifier(name)
        ))
    }

    fn database_exists(&self, name: &str) -> WeaveResult<String> {
        Ok(format!("SELECT COUNT(*) FROM sys.databases WHERE name = {}", n(name)))
    }

    fn table_exists(&self, table: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT CASE WHEN OBJECT_ID({}, N'U') IS NULL THEN 0 ELSE 1 END",
            n(table)
        ))
    }

    fn column_exists(&self, table: &str, column: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM sys.columns WHERE object_id = OBJECT_ID({}) AND name = {}",
            n(table),
            n(column)
        ))
    }

    fn index_exists(&self, table: &str, index: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM sys.indexes WHERE object_id = OBJECT_ID({}) AND name = {}",
            n(table),
            n(index)
        ))
    }

    fn foreign_key_exists(&self, table: &str, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM sys.foreign_keys WHERE parent_object_id = OBJECT_ID({}) AND name = {}",
            n(table),
            n(name)
        ))
    }

    fn returning_identity(&self, insert: &str, _column: &str) -> Option<String> {
        Some(format!("{}; SELECT SCOPE_IDENTITY()", insert))
    }
}
