use serde::Deserialize;

use crate::config::TranslatorOptions;
use crate::transpiler::sql::generic::GenericTranslator;
use crate::transpiler::sql::mysql::MysqlTranslator;
use crate::transpiler::sql::oracle::OracleTranslator;
use crate::transpiler::sql::postgres::PostgresTranslator;
use crate::transpiler::sql::sqlite::SqliteTranslator;
use crate::transpiler::sql::sqlserver::SqlServerTranslator;
use crate::transpiler::traits::SqlTranslator;

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// ANSI-flavored baseline with unquoted identifiers
    #[default]
    Generic,
    MySql,
    Postgres,
    SqlServer,
    Oracle,
    Sqlite,
}

impl Dialect {
    pub const ALL: [Dialect; 6] = [
        Dialect::Generic,
        Dialect::MySql,
        Dialect::Postgres,
        Dialect::SqlServer,
        Dialect::Oracle,
        Dialect::Sqlite,
    ];

    pub fn translator(&self) -> Box<dyn SqlTranslator> {
        self.translator_with(TranslatorOptions::default())
    }

    pub fn translator_with(&self, options: TranslatorOptions) -> Box<dyn SqlTranslator> {
        match self {
            Dialect::Generic => Box::new(GenericTranslator::new(options)),
            Dialect::MySql => Box::new(MysqlTranslator::new(options)),
            Dialect::Postgres => Box::new(PostgresTranslator::new(options)),
            Dialect::SqlServer => Box::new(SqlServerTranslator::new(options)),
            Dialect::Oracle => Box::new(OracleTranslator::new(options)),
            Dialect::Sqlite => Box::new(SqliteTranslator::new(options)),
        }
    }
}
