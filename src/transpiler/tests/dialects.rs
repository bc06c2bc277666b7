//! Per-dialect literals, type names and probes.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use crate::ast::{BinaryOp, UnaryOp};
use crate::config::TranslatorOptions;
use crate::schema::LogicalType;
use crate::transpiler::{DdlOp, Dialect};

#[test]
fn test_identifier_quoting() {
    let quoted: Vec<String> = Dialect::ALL
        .iter()
        .map(|d| d.translator().quote_identifier("Name"))
        .collect();
    assert_eq!(
        quoted,
        vec!["Name", "`Name`", "\"Name\"", "[Name]", "\"Name\"", "\"Name\""]
    );
}

#[test]
fn test_quoting_escapes_delimiters() {
    assert_eq!(Dialect::MySql.translator().quote_identifier("a`b"), "`a``b`");
    assert_eq!(Dialect::SqlServer.translator().quote_identifier("a]b"), "[a]]b]");
    assert_eq!(Dialect::Postgres.translator().quote_identifier("a\"b"), "\"a\"\"b\"");
}

#[test]
fn test_names() {
    let names: Vec<&str> = Dialect::ALL.iter().map(|d| d.translator().name()).collect();
    assert_eq!(
        names,
        vec!["Generic", "MySql", "Postgres", "SqlServer", "Oracle", "Sqlite"]
    );
}

#[test]
fn test_bool_literals() {
    assert_eq!(Dialect::Generic.translator().bool_literal(true), "true");
    assert_eq!(Dialect::Postgres.translator().bool_literal(false), "false");
    for dialect in [Dialect::MySql, Dialect::SqlServer, Dialect::Oracle, Dialect::Sqlite] {
        let translator = dialect.translator();
        assert_eq!(translator.bool_literal(true), "1");
        assert_eq!(translator.bool_literal(false), "0");
    }
}

#[test]
fn test_parameter_tags() {
    for dialect in Dialect::ALL {
        let translator = dialect.translator();
        let mut params = translator.new_parameters();
        let expected = if dialect == Dialect::Oracle { ":p0" } else { "@p0" };
        assert_eq!(params.add(1), expected);
    }
}

#[test]
fn test_datetime_literals() {
    let dt = NaiveDate::from_ymd_opt(2023, 5, 6)
        .unwrap()
        .and_hms_milli_opt(7, 8, 9, 250)
        .unwrap();
    assert_eq!(
        Dialect::Generic.translator().datetime_literal(&dt),
        "'2023-05-06 07:08:09.250'"
    );
    assert_eq!(
        Dialect::Oracle.translator().datetime_literal(&dt),
        "TIMESTAMP '2023-05-06 07:08:09.250'"
    );
}

#[test]
fn test_operator_formatting() {
    let translator = Dialect::Generic.translator();
    assert_eq!(translator.format_binary(BinaryOp::Ne, "a", "b"), "(a <> b)");
    assert_eq!(translator.format_binary(BinaryOp::Rem, "a", "b"), "(a % b)");
    assert_eq!(translator.format_unary(UnaryOp::Not, "a"), "(NOT a)");
    assert_eq!(translator.format_unary(UnaryOp::Neg, "a"), "(-a)");
}

#[test]
fn test_exists_wrappers() {
    let inner = "SELECT 1 FROM T";
    assert_eq!(
        Dialect::Generic.translator().exists(inner),
        "SELECT CASE WHEN EXISTS(SELECT 1 FROM T) THEN 1 ELSE 0 END"
    );
    assert_eq!(
        Dialect::Postgres.translator().exists(inner),
        "SELECT EXISTS(SELECT 1 FROM T)"
    );
    assert_eq!(
        Dialect::Oracle.translator().exists(inner),
        "SELECT CASE WHEN EXISTS(SELECT 1 FROM T) THEN 1 ELSE 0 END FROM DUAL"
    );
}

#[test]
fn test_selectable_table_nolock() {
    assert_eq!(Dialect::SqlServer.translator().selectable_table("T"), "[T]");
    let nolock = Dialect::SqlServer.translator_with(TranslatorOptions::default().sqlserver_nolock(true));
    assert_eq!(nolock.selectable_table("T"), "[T] WITH (NOLOCK)");
    let generic = Dialect::Generic.translator_with(TranslatorOptions::default().sqlserver_nolock(true));
    assert_eq!(generic.selectable_table("T"), "T");
}

#[test]
fn test_column_type_names() {
    let row = |ty: LogicalType, size: u32, precision: u32| -> Vec<String> {
        Dialect::ALL
            .iter()
            .map(|d| d.translator().type_name(ty, size, precision, false))
            .collect()
    };

    assert_eq!(
        row(LogicalType::Boolean, 0, 0),
        vec!["BOOLEAN", "TINYINT(1)", "BOOLEAN", "BIT", "NUMBER(1)", "INTEGER"]
    );
    assert_eq!(
        row(LogicalType::Long, 0, 0),
        vec!["BIGINT", "BIGINT", "BIGINT", "BIGINT", "NUMBER(19)", "INTEGER"]
    );
    assert_eq!(
        row(LogicalType::Decimal, 10, 2),
        vec![
            "DECIMAL(10, 2)",
            "DECIMAL(10, 2)",
            "NUMERIC(10, 2)",
            "DECIMAL(10, 2)",
            "NUMBER(10, 2)",
            "NUMERIC"
        ]
    );
    assert_eq!(
        row(LogicalType::String, 0, 0),
        vec!["TEXT", "LONGTEXT", "TEXT", "NVARCHAR(MAX)", "NCLOB", "TEXT"]
    );
    assert_eq!(
        row(LogicalType::String, 40, 0),
        vec!["VARCHAR(40)", "VARCHAR(40)", "VARCHAR(40)", "NVARCHAR(40)", "NVARCHAR2(40)", "TEXT"]
    );
    assert_eq!(
        row(LogicalType::Guid, 0, 0),
        vec!["CHAR(36)", "CHAR(36)", "UUID", "UNIQUEIDENTIFIER", "CHAR(36)", "TEXT"]
    );
    assert_eq!(
        row(LogicalType::Binary, 0, 0),
        vec!["BLOB", "LONGBLOB", "BYTEA", "VARBINARY(MAX)", "BLOB", "BLOB"]
    );
}

#[test]
fn test_decimal_defaults_to_eighteen_digits() {
    assert_eq!(
        Dialect::Generic.translator().type_name(LogicalType::Decimal, 0, 0, false),
        "DECIMAL(18, 0)"
    );
}

#[test]
fn test_idempotent_error_codes() {
    let oracle = Dialect::Oracle.translator();
    assert!(oracle.is_idempotent_error(DdlOp::CreateTable, -955));
    assert!(oracle.is_idempotent_error(DdlOp::CreateIndex, -1408));
    assert!(oracle.is_idempotent_error(DdlOp::CreateForeignKey, -2264));
    assert!(oracle.is_idempotent_error(DdlOp::DropSequence, -2289));
    assert!(!oracle.is_idempotent_error(DdlOp::CreateTable, -942));

    for dialect in [Dialect::Generic, Dialect::Postgres, Dialect::SqlServer] {
        assert!(!dialect.translator().is_idempotent_error(DdlOp::CreateTable, -955));
    }
}

#[test]
fn test_existence_probes() {
    assert_eq!(
        Dialect::Oracle.translator().database_exists("app").unwrap(),
        "SELECT COUNT(*) FROM all_users WHERE username = 'APP'"
    );
    assert_eq!(
        Dialect::Postgres.translator().database_exists("app").unwrap(),
        "SELECT COUNT(*) FROM pg_database WHERE datname = 'app'"
    );
    assert_eq!(
        Dialect::Sqlite.translator().table_exists("Orders").unwrap(),
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'Orders'"
    );
    assert_eq!(
        Dialect::SqlServer.translator().table_exists("Orders").unwrap(),
        "SELECT CASE WHEN OBJECT_ID(N'Orders', N'U') IS NULL THEN 0 ELSE 1 END"
    );
    assert_eq!(
        Dialect::Generic.translator().column_exists("Orders", "Name").unwrap(),
        "SELECT COUNT(*) FROM information_schema.columns WHERE table_name = 'Orders' AND column_name = 'Name'"
    );
    assert_eq!(
        Dialect::Oracle.translator().foreign_key_exists("Orders", "FK_X").unwrap(),
        "SELECT COUNT(*) FROM user_constraints WHERE constraint_type = 'R' AND table_name = 'Orders' AND constraint_name = 'FK_X'"
    );
}

#[test]
fn test_probe_literals_are_escaped() {
    assert_eq!(
        Dialect::Generic.translator().table_exists("O'Brien").unwrap(),
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = 'O''Brien'"
    );
}

#[test]
fn test_unsupported_probes() {
    assert!(Dialect::Generic.translator().index_exists("Orders", "IX").is_err());
    assert!(Dialect::Sqlite.translator().column_exists("Orders", "Name").is_err());
    assert!(Dialect::Sqlite.translator().foreign_key_exists("Orders", "FK").is_err());
}
