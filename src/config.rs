//! sqlweave configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::WeaveResult;
use crate::transpiler::{Dialect, SqlTranslator};

/// File name searched in the working directory by [`Config::discover`].
pub const CONFIG_FILE: &str = "sqlweave.toml";

/// Main configuration, read from the `[sql]` table of a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sql: SqlConfig,
}

/// The `[sql]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SqlConfig {
    /// Target engine
    #[serde(default)]
    pub dialect: Dialect,

    #[serde(flatten)]
    pub options: TranslatorOptions,
}

/// Knobs shared by every translator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranslatorOptions {
    /// Synthesized FK_/IX_ names are cut to this many characters; 0 disables.
    pub max_constraint_name_len: usize,

    /// Bind BETWEEN date/time bounds as parameters instead of embedding literals.
    pub bind_between_datetimes: bool,

    /// Append `WITH (NOLOCK)` to SQL Server table references in FROM and JOIN.
    pub sqlserver_nolock: bool,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            max_constraint_name_len: 20,
            bind_between_datetimes: true,
            sqlserver_nolock: false,
        }
    }
}

impl TranslatorOptions {
    pub fn max_constraint_name_len(mut self, len: usize) -> Self {
        self.max_constraint_name_len = len;
        self
    }

    pub fn bind_between_datetimes(mut self, bind: bool) -> Self {
        self.bind_between_datetimes = bind;
        self
    }

    pub fn sqlserver_nolock(mut self, nolock: bool) -> Self {
        self.sqlserver_nolock = nolock;
        self
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> WeaveResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from an explicit file.
    pub fn load(path: impl AsRef<Path>) -> WeaveResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.as_ref().display(), dialect = ?config.sql.dialect, "loaded config");
        Ok(config)
    }

    /// `./sqlweave.toml`, then `<config dir>/sqlweave/config.toml`, else defaults.
    pub fn discover() -> WeaveResult<Self> {
        for path in Self::candidates() {
            if path.is_file() {
                return Self::load(path);
            }
        }
        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("sqlweave").join("config.toml"));
        }
        paths
    }

    /// The configured translator.
    pub fn translator(&self) -> Box<dyn SqlTranslator> {
        self.sql.dialect.translator_with(self.sql.options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeaveError;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.sql.dialect, Dialect::Generic);
        assert_eq!(config.sql.options, TranslatorOptions::default());
        assert_eq!(config.sql.options.max_constraint_name_len, 20);
    }

    #[test]
    fn test_sql_table() {
        let config = Config::from_toml_str(
            r#"
            [sql]
            dialect = "sqlserver"
            max_constraint_name_len = 0
            bind_between_datetimes = false
            sqlserver_nolock = true
            "#,
        )
        .unwrap();

        assert_eq!(config.sql.dialect, Dialect::SqlServer);
        assert_eq!(config.sql.options.max_constraint_name_len, 0);
        assert!(!config.sql.options.bind_between_datetimes);
        assert!(config.sql.options.sqlserver_nolock);
        assert_eq!(config.translator().name(), "SqlServer");
    }

    #[test]
    fn test_unknown_dialect_is_rejected() {
        let err = Config::from_toml_str("[sql]\ndialect = \"db2\"").unwrap_err();
        assert!(matches!(err, WeaveError::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("sqlweave-{}.toml", std::process::id()));
        std::fs::write(&path, "[sql]\ndialect = \"oracle\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.sql.dialect, Dialect::Oracle);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load("/definitely/not/here/sqlweave.toml").unwrap_err();
        assert!(matches!(err, WeaveError::Io(_)));
    }
}
