//! Translator trait with the baseline SQL surface every dialect starts from.

use chrono::NaiveDateTime;

use super::ddl::{self, DdlOp};
use super::params::Parameters;
use crate::ast::{BinaryOp, UnaryOp};
use crate::config::TranslatorOptions;
use crate::error::{WeaveError, WeaveResult};
use crate::query::QueryParts;
use crate::schema::{FieldDefinition, Identity, IndexDefinition, LogicalType, TableDefinition};

/// Dialect-specific SQL emission.
///
/// Every method has a default producing ANSI-flavored SQL; a dialect overrides
/// only the points where its engine differs. Methods returning `WeaveResult`
/// fail with [`WeaveError::UnsupportedDialectFeature`] when the engine has no
/// equivalent.
pub trait SqlTranslator: Send + Sync {
    /// Display name, used in error messages and logs.
    fn name(&self) -> &'static str;

    fn options(&self) -> &TranslatorOptions;

    // ---- identifiers ----

    /// Quote an identifier. The baseline leaves identifiers bare.
    fn quote_identifier(&self, name: &str) -> String {
        name.to_string()
    }

    fn table_name(&self, table: &str) -> String {
        self.quote_identifier(table)
    }

    /// Table reference as it appears in FROM and JOIN clauses.
    fn selectable_table(&self, table: &str) -> String {
        self.table_name(table)
    }

    fn column_ref(&self, table: &str, column: &str) -> String {
        format!("{}.{}", self.table_name(table), self.quote_identifier(column))
    }

    // ---- literals and parameters ----

    /// Placeholder prefix; parameter keys are `<tag>p<n>`.
    fn parameter_tag(&self) -> &'static str {
        "@"
    }

    fn new_parameters(&self) -> Parameters {
        Parameters::new(self.parameter_tag())
    }

    fn bool_literal(&self, value: bool) -> String {
        if value { "true" } else { "false" }.to_string()
    }

    fn datetime_literal(&self, value: &NaiveDateTime) -> String {
        format!("'{}'", value.format("%Y-%m-%d %H:%M:%S%.f"))
    }

    // ---- operators and functions ----

    fn format_binary(&self, op: BinaryOp, lhs: &str, rhs: &str) -> String {
        match op {
            BinaryOp::Concat => self.string_concat(lhs, rhs),
            _ => format!("({} {} {})", lhs, op.sql_symbol(), rhs),
        }
    }

    fn format_unary(&self, op: UnaryOp, operand: &str) -> String {
        match op {
            UnaryOp::Not => format!("(NOT {})", operand),
            UnaryOp::Neg => format!("(-{})", operand),
        }
    }

    fn string_concat(&self, lhs: &str, rhs: &str) -> String {
        format!("({} || {})", lhs, rhs)
    }

    /// Two-argument NULL replacement function.
    fn null_function(&self) -> &'static str {
        "COALESCE"
    }

    fn length_function(&self) -> &'static str {
        "LENGTH"
    }

    fn trim(&self, operand: &str) -> String {
        format!("TRIM({})", operand)
    }

    // ---- SELECT shaping ----

    /// Limit the result to `n` rows.
    fn top(&self, parts: &mut QueryParts, _params: &mut Parameters, n: u64) {
        parts.end_clause = format!("LIMIT {}", n);
    }

    /// Restrict the result to the 1-based page `page` of `size` rows.
    fn paginate(&self, parts: &mut QueryParts, _params: &mut Parameters, size: u64, page: u64) {
        let offset = size.saturating_mul(page.saturating_sub(1));
        parts.end_clause = format!("LIMIT {} OFFSET {}", size, offset);
    }

    /// ORDER BY expression required when an end clause is present without one.
    fn default_order_by(&self) -> Option<&'static str> {
        None
    }

    /// Wrap a complete SELECT into an existence probe.
    fn exists(&self, sql: &str) -> String {
        format!("SELECT CASE WHEN EXISTS({}) THEN 1 ELSE 0 END", sql)
    }

    // ---- types ----

    /// Concrete type keyword for `ty`. `casting` selects the form accepted by CAST.
    fn type_name(&self, ty: LogicalType, size: u32, precision: u32, casting: bool) -> String {
        ddl::ansi_type_name(ty, size, precision, casting)
    }

    /// Inline column clause declaring an identity, if the engine has one.
    fn identity_clause(&self, identity: &Identity) -> Option<String> {
        Some(format!(
            "GENERATED BY DEFAULT AS IDENTITY (START WITH {} INCREMENT BY {})",
            identity.start, identity.increment
        ))
    }

    fn column_definition(&self, table: &TableDefinition, field: &FieldDefinition) -> String {
        let mut def = format!(
            "{} {}",
            self.quote_identifier(&field.name),
            self.type_name(field.ty, field.size, field.precision, false)
        );
        if let Some(clause) = field.identity.as_ref().and_then(|i| self.identity_clause(i)) {
            def.push(' ');
            def.push_str(&clause);
        }
        def.push_str(if field.nullable { " NULL" } else { " NOT NULL" });
        if field.primary_key && table.primary_keys().count() == 1 {
            def.push_str(" PRIMARY KEY");
        }
        def
    }

    /// Trailing table options after the closing parenthesis.
    fn table_options(&self, _table: &TableDefinition) -> String {
        String::new()
    }

    /// Whether foreign keys are declared inside CREATE TABLE.
    fn inline_foreign_keys(&self) -> bool {
        false
    }

    // ---- tables ----

    /// The CREATE TABLE statement alone, without indexes or foreign keys.
    fn create_table_statement(&self, table: &TableDefinition, if_not_exists: bool) -> WeaveResult<String> {
        let guard = if if_not_exists { "IF NOT EXISTS " } else { "" };
        Ok(format!("CREATE TABLE {}{}", guard, ddl::table_body(self, table)))
    }

    /// CREATE TABLE plus its indexes and foreign keys.
    fn create_table(&self, table: &TableDefinition) -> WeaveResult<Vec<String>> {
        ddl::create_table(self, table, false)
    }

    fn create_table_if_not_exists(&self, table: &TableDefinition) -> WeaveResult<Vec<String>> {
        ddl::create_table(self, table, true)
    }

    fn drop_table(&self, table: &TableDefinition) -> WeaveResult<Vec<String>> {
        Ok(vec![format!("DROP TABLE {}", self.table_name(table.name()))])
    }

    fn drop_table_if_exists(&self, table: &TableDefinition) -> WeaveResult<Vec<String>> {
        Ok(vec![format!("DROP TABLE IF EXISTS {}", self.table_name(table.name()))])
    }

    // ---- columns ----

    fn create_column(&self, table: &TableDefinition, field: &FieldDefinition) -> WeaveResult<String> {
        Ok(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            self.table_name(table.name()),
            self.column_definition(table, field)
        ))
    }

    fn create_column_if_not_exists(&self, table: &TableDefinition, field: &FieldDefinition) -> WeaveResult<String> {
        Ok(format!(
            "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {}",
            self.table_name(table.name()),
            self.column_definition(table, field)
        ))
    }

    fn drop_column(&self, table: &str, column: &str) -> WeaveResult<String> {
        Ok(format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.table_name(table),
            self.quote_identifier(column)
        ))
    }

    fn drop_column_if_exists(&self, table: &str, column: &str) -> WeaveResult<String> {
        Ok(format!(
            "ALTER TABLE {} DROP COLUMN IF EXISTS {}",
            self.table_name(table),
            self.quote_identifier(column)
        ))
    }

    // ---- indexes ----

    fn create_index(&self, table: &TableDefinition, index: &IndexDefinition) -> WeaveResult<String> {
        Ok(ddl::create_index(self, table, index, false))
    }

    fn create_index_if_not_exists(&self, table: &TableDefinition, index: &IndexDefinition) -> WeaveResult<String> {
        Ok(ddl::create_index(self, table, index, true))
    }

    fn drop_index(&self, _table: &str, index: &str) -> WeaveResult<String> {
        Ok(format!("DROP INDEX {}", self.quote_identifier(index)))
    }

    fn drop_index_if_exists(&self, _table: &str, index: &str) -> WeaveResult<String> {
        Ok(format!("DROP INDEX IF EXISTS {}", self.quote_identifier(index)))
    }

    // ---- foreign keys ----

    fn create_foreign_key(&self, table: &TableDefinition, field: &FieldDefinition) -> WeaveResult<String> {
        ddl::add_foreign_key(self, table, field)
    }

    fn create_foreign_key_if_not_exists(&self, _table: &TableDefinition, _field: &FieldDefinition) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "idempotent foreign key creation"))
    }

    fn drop_foreign_key(&self, table: &str, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            self.table_name(table),
            self.quote_identifier(name)
        ))
    }

    fn drop_foreign_key_if_exists(&self, table: &str, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "ALTER TABLE {} DROP CONSTRAINT IF EXISTS {}",
            self.table_name(table),
            self.quote_identifier(name)
        ))
    }

    // ---- databases ----

    fn create_database(&self, name: &str) -> WeaveResult<String> {
        Ok(format!("CREATE DATABASE {}", self.quote_identifier(name)))
    }

    fn create_database_if_not_exists(&self, name: &str) -> WeaveResult<String> {
        Ok(format!("CREATE DATABASE IF NOT EXISTS {}", self.quote_identifier(name)))
    }

    fn drop_database(&self, name: &str) -> WeaveResult<String> {
        Ok(format!("DROP DATABASE {}", self.quote_identifier(name)))
    }

    fn drop_database_if_exists(&self, name: &str) -> WeaveResult<String> {
        Ok(format!("DROP DATABASE IF EXISTS {}", self.quote_identifier(name)))
    }

    // ---- introspection ----
    //
    // Each probe is a query returning a single count-like scalar: zero when absent.

    fn database_exists(&self, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM information_schema.schemata WHERE schema_name = {}",
            ddl::quote_literal(name)
        ))
    }

    fn table_exists(&self, table: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = {}",
            ddl::quote_literal(table)
        ))
    }

    fn column_exists(&self, table: &str, column: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM information_schema.columns WHERE table_name = {} AND column_name = {}",
            ddl::quote_literal(table),
            ddl::quote_literal(column)
        ))
    }

    fn index_exists(&self, _table: &str, _index: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "index introspection"))
    }

    fn foreign_key_exists(&self, table: &str, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM information_schema.table_constraints WHERE constraint_type = 'FOREIGN KEY' AND table_name = {} AND constraint_name = {}",
            ddl::quote_literal(table),
            ddl::quote_literal(name)
        ))
    }

    /// Whether the engine error `code` raised by `op` means "already in the
    /// desired state" and may be ignored.
    fn is_idempotent_error(&self, _op: DdlOp, _code: i32) -> bool {
        false
    }

    // ---- DML ----

    /// Extend an INSERT so it also yields the generated identity of `column`.
    fn returning_identity(&self, _insert: &str, _column: &str) -> Option<String> {
        None
    }
}
