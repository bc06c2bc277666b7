//! Error types for sqlweave.

use thiserror::Error;

/// The main error type for query compilation and SQL translation.
#[derive(Debug, Error)]
pub enum WeaveError {
    /// An expression shape the partial evaluator cannot resolve.
    #[error("Unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// A DDL or introspection operation the target engine does not support.
    #[error("{dialect} does not support {feature}")]
    UnsupportedDialectFeature {
        dialect: &'static str,
        feature: &'static str,
    },

    /// A host-side call failed while being folded into a constant.
    #[error("Host call '{name}' failed: {message}")]
    HostCall { name: String, message: String },

    /// The query text is frozen once built.
    #[error("Query has already been built")]
    AlreadyBuilt,

    /// `top` and `paginate` both target the end clause.
    #[error("top() and paginate() cannot be combined on the same query")]
    PaginationConflict,

    /// Identity-based helpers need exactly one primary key field.
    #[error("Table '{0}' has no single primary key field")]
    MissingPrimaryKey(String),

    /// Malformed table description.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl WeaveError {
    /// Create an unsupported expression error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedExpression(message.into())
    }

    /// Create an unsupported dialect feature error.
    pub fn unsupported_feature(dialect: &'static str, feature: &'static str) -> Self {
        Self::UnsupportedDialectFeature { dialect, feature }
    }

    /// Create a host call error.
    pub fn host_call(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HostCall {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for sqlweave operations.
pub type WeaveResult<T> = Result<T, WeaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WeaveError::unsupported("member 'Total' has no column");
        assert_eq!(
            err.to_string(),
            "Unsupported expression: member 'Total' has no column"
        );

        let err = WeaveError::unsupported_feature("SQLite", "DROP COLUMN");
        assert_eq!(err.to_string(), "SQLite does not support DROP COLUMN");
    }
}
