use serde::{Deserialize, Serialize};

/// Logical column type, mapped to a concrete keyword by each dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    Boolean,
    /// 16-bit integer
    Short,
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    Long,
    /// Single precision float
    Float,
    /// Double precision float
    Double,
    Decimal,
    String,
    DateTime,
    Guid,
    Binary,
}

impl LogicalType {
    /// Integral types can carry an identity (auto increment) attribute.
    pub fn is_integral(&self) -> bool {
        matches!(self, LogicalType::Short | LogicalType::Integer | LogicalType::Long)
    }
}

impl std::fmt::Display for LogicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl std::str::FromStr for LogicalType {
    type Err = crate::error::WeaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Boolean" => LogicalType::Boolean,
            "Short" => LogicalType::Short,
            "Integer" => LogicalType::Integer,
            "Long" => LogicalType::Long,
            "Float" => LogicalType::Float,
            "Double" => LogicalType::Double,
            "Decimal" => LogicalType::Decimal,
            "String" => LogicalType::String,
            "DateTime" => LogicalType::DateTime,
            "Guid" => LogicalType::Guid,
            "Binary" => LogicalType::Binary,
            other => {
                return Err(crate::error::WeaveError::unsupported(format!(
                    "unknown cast target type '{}'",
                    other
                )));
            }
        })
    }
}
