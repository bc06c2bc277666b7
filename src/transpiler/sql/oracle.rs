use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::TranslatorOptions;
use crate::error::{WeaveError, WeaveResult};
use crate::query::QueryParts;
use crate::schema::{FieldDefinition, Identity, IndexDefinition, LogicalType, TableDefinition};
use crate::transpiler::ddl::{self, DdlOp, quote_literal};
use crate::transpiler::params::Parameters;
use crate::transpiler::traits::SqlTranslator;

/// Oracle has no IF [NOT] EXISTS; idempotent DDL runs inside a PL/SQL block that
/// swallows the error codes meaning "already done".
#[derive(Debug, Clone, Default)]
pub struct OracleTranslator {
    options: TranslatorOptions,
}

/// Error codes that mean `op` found the object already in the desired state.
pub fn idempotent_error_codes(op: DdlOp) -> &'static [i32] {
    match op {
        DdlOp::CreateTable | DdlOp::CreateSequence => &[-955],
        DdlOp::CreateIndex => &[-955, -1408],
        DdlOp::CreateTrigger => &[-4081],
        DdlOp::DropTable => &[-942],
        DdlOp::DropSequence => &[-2289],
        DdlOp::CreateColumn => &[-1430],
        DdlOp::DropColumn => &[-904],
        DdlOp::DropIndex => &[-1418],
        DdlOp::CreateForeignKey => &[-2275, -2264],
        DdlOp::DropForeignKey => &[-2443],
    }
}

/// Wrap `statement` so the error codes of `op` are ignored.
pub fn guard(op: DdlOp, statement: &str) -> String {
    let codes: Vec<String> = idempotent_error_codes(op)
        .iter()
        .map(|c| c.to_string())
        .collect();
    format!(
        "BEGIN\n  EXECUTE IMMEDIATE {};\nEXCEPTION\n  WHEN OTHERS THEN\n    IF SQLCODE NOT IN ({}) THEN\n      RAISE;\n    END IF;\nEND;",
        quote_literal(statement),
        codes.join(", ")
    )
}

fn row_bound(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl OracleTranslator {
    pub fn new(options: TranslatorOptions) -> Self {
        Self { options }
    }

    fn sequence_name(&self, table: &TableDefinition) -> String {
        format!("SEQ_{}", table.name())
    }

    fn trigger_name(&self, table: &TableDefinition) -> String {
        format!("TRG_{}", table.name())
    }

    /// Sequence + BEFORE INSERT trigger emulating an identity column.
    fn identity_statements(&self, table: &TableDefinition, field: &FieldDefinition, identity: Identity, guarded: bool) -> Vec<String> {
        let sequence = self.quote_identifier(&self.sequence_name(table));
        let column = self.quote_identifier(&field.name);
        let create_sequence = format!(
            "CREATE SEQUENCE {} START WITH {} INCREMENT BY {}",
            sequence, identity.start, identity.increment
        );
        let create_trigger = format!(
            "CREATE TRIGGER {} BEFORE INSERT ON {} FOR EACH ROW WHEN (new.{} IS NULL) BEGIN SELECT {}.NEXTVAL INTO :new.{} FROM DUAL; END;",
            self.quote_identifier(&self.trigger_name(table)),
            self.table_name(table.name()),
            column,
            sequence,
            column
        );

        if guarded {
            vec![
                guard(DdlOp::CreateSequence, &create_sequence),
                guard(DdlOp::CreateTrigger, &create_trigger),
            ]
        } else {
            vec![create_sequence, create_trigger]
        }
    }

    fn plan_create(&self, table: &TableDefinition, guarded: bool) -> WeaveResult<Vec<String>> {
        let mut statements = ddl::create_table(self, table, guarded)?;
        if let Some(field) = table.identity_field() {
            let identity = field.identity.unwrap_or_default();
            let extra = self.identity_statements(table, field, identity, guarded);
            debug!(table = table.name(), "emulating identity with sequence and trigger");
            statements.splice(1..1, extra);
        }
        Ok(statements)
    }
}

impl SqlTranslator for OracleTranslator {
    fn name(&self) -> &'static str {
        "Oracle"
    }

    fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn parameter_tag(&self) -> &'static str {
        ":"
    }

    fn bool_literal(&self, value: bool) -> String {
        if value { "1" } else { "0" }.to_string()
    }

    fn datetime_literal(&self, value: &NaiveDateTime) -> String {
        format!("TIMESTAMP '{}'", value.format("%Y-%m-%d %H:%M:%S%.f"))
    }

    fn null_function(&self) -> &'static str {
        "NVL"
    }

    fn top(&self, parts: &mut QueryParts, params: &mut Parameters, n: u64) {
        let key = params.add(row_bound(n));
        parts.row_window = format!("(ROWNUM <= {})", key);
    }

    fn paginate(&self, parts: &mut QueryParts, params: &mut Parameters, size: u64, page: u64) {
        let offset = size.saturating_mul(page.saturating_sub(1));
        let low = params.add(row_bound(offset));
        let high = params.add(row_bound(offset.saturating_add(size)));
        parts.row_window = format!("((ROWNUM > {}) AND (ROWNUM <= {}))", low, high);
    }

    fn exists(&self, sql: &str) -> String {
        format!("SELECT CASE WHEN EXISTS({}) THEN 1 ELSE 0 END FROM DUAL", sql)
    }

    fn type_name(&self, ty: LogicalType, size: u32, precision: u32, casting: bool) -> String {
        match ty {
            LogicalType::Boolean => "NUMBER(1)".into(),
            LogicalType::Short => "NUMBER(5)".into(),
            LogicalType::Integer => "NUMBER(10)".into(),
            LogicalType::Long => "NUMBER(19)".into(),
            LogicalType::Float => "BINARY_FLOAT".into(),
            LogicalType::Double => "BINARY_DOUBLE".into(),
            LogicalType::Decimal => format!("NUMBER({}, {})", ddl::decimal_digits(size), precision),
            LogicalType::String if size > 0 => format!("NVARCHAR2({})", size),
            LogicalType::String if casting => "NVARCHAR2(2000)".into(),
            LogicalType::String => "NCLOB".into(),
            LogicalType::DateTime => "TIMESTAMP".into(),
            LogicalType::Guid => "CHAR(36)".into(),
            LogicalType::Binary if size > 0 => format!("RAW({})", size),
            LogicalType::Binary => "BLOB".into(),
        }
    }

    fn identity_clause(&self, _identity: &Identity) -> Option<String> {
        None
    }

    fn create_table_statement(&self, table: &TableDefinition, if_not_exists: bool) -> WeaveResult<String> {
        let create = format!("CREATE TABLE {}", ddl::table_body(self, table));
        Ok(if if_not_exists {
            guard(DdlOp::CreateTable, &create)
        } else {
            create
        })
    }

    fn create_table(&self, table: &TableDefinition) -> WeaveResult<Vec<String>> {
        self.plan_create(table, false)
    }

    fn create_table_if_not_exists(&self, table: &TableDefinition) -> WeaveResult<Vec<String>> {
        self.plan_create(table, true)
    }

    fn drop_table(&self, table: &TableDefinition) -> WeaveResult<Vec<String>> {
        let mut statements = vec![format!("DROP TABLE {}", self.table_name(table.name()))];
        if table.identity_field().is_some() {
            statements.push(format!(
                "DROP SEQUENCE {}",
                self.quote_identifier(&self.sequence_name(table))
            ));
        }
        Ok(statements)
    }

    fn drop_table_if_exists(&self, table: &TableDefinition) -> WeaveResult<Vec<String>> {
        let ops = [DdlOp::DropTable, DdlOp::DropSequence];
        Ok(self
            .drop_table(table)?
            .iter()
            .zip(ops)
            .map(|(statement, op)| guard(op, statement))
            .collect())
    }

    fn create_column(&self, table: &TableDefinition, field: &FieldDefinition) -> WeaveResult<String> {
        Ok(format!(
            "ALTER TABLE {} ADD {}",
            self.table_name(table.name()),
            self.column_definition(table, field)
        ))
    }

    fn create_column_if_not_exists(&self, table: &TableDefinition, field: &FieldDefinition) -> WeaveResult<String> {
        Ok(guard(DdlOp::CreateColumn, &self.create_column(table, field)?))
    }

    fn drop_column_if_exists(&self, table: &str, column: &str) -> WeaveResult<String> {
        Ok(guard(DdlOp::DropColumn, &self.drop_column(table, column)?))
    }

    fn create_index_if_not_exists(&self, table: &TableDefinition, index: &IndexDefinition) -> WeaveResult<String> {
        Ok(guard(DdlOp::CreateIndex, &self.create_index(table, index)?))
    }

    fn drop_index_if_exists(&self, table: &str, index: &str) -> WeaveResult<String> {
        Ok(guard(DdlOp::DropIndex, &self.drop_index(table, index)?))
    }

    fn create_foreign_key_if_not_exists(&self, table: &TableDefinition, field: &FieldDefinition) -> WeaveResult<String> {
        Ok(guard(DdlOp::CreateForeignKey, &self.create_foreign_key(table, field)?))
    }

    fn drop_foreign_key_if_exists(&self, table: &str, name: &str) -> WeaveResult<String> {
        Ok(guard(DdlOp::DropForeignKey, &self.drop_foreign_key(table, name)?))
    }

    fn create_database(&self, _name: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "CREATE DATABASE"))
    }

    fn create_database_if_not_exists(&self, _name: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "CREATE DATABASE"))
    }

    fn drop_database(&self, _name: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "DROP DATABASE"))
    }

    fn drop_database_if_exists(&self, _name: &str) -> WeaveResult<String> {
        Err(WeaveError::unsupported_feature(self.name(), "DROP DATABASE"))
    }

    fn database_exists(&self, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM all_users WHERE username = {}",
            quote_literal(&name.to_uppercase())
        ))
    }

    fn table_exists(&self, table: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM user_tables WHERE table_name = {}",
            quote_literal(table)
        ))
    }

    fn column_exists(&self, table: &str, column: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM user_tab_columns WHERE table_name = {} AND column_name = {}",
            quote_literal(table),
            quote_literal(column)
        ))
    }

    fn index_exists(&self, table: &str, index: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM user_indexes WHERE table_name = {} AND index_name = {}",
            quote_literal(table),
            quote_literal(index)
        ))
    }

    fn foreign_key_exists(&self, table: &str, name: &str) -> WeaveResult<String> {
        Ok(format!(
            "SELECT COUNT(*) FROM user_constraints WHERE constraint_type = 'R' AND table_name = {} AND constraint_name = {}",
            quote_literal(table),
            quote_literal(name)
        ))
    }

    fn is_idempotent_error(&self, op: DdlOp, code: i32) -> bool {
        idempotent_error_codes(op).contains(&code)
    }

    fn returning_identity(&self, insert: &str, column: &str) -> Option<String> {
        let column = self.quote_identifier(column);
        Some(format!("{} RETURNING {} INTO :id", insert, column))
    }
}
