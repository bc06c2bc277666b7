use serde::{Deserialize, Serialize};

use super::LogicalType;

/// Identity (auto increment) settings of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub start: i64,
    pub increment: i64,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            start: 1,
            increment: 1,
        }
    }
}

/// Foreign key target of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Referenced table name
    pub table: String,
    /// Referenced column name
    pub column: String,
    /// Explicit constraint name; synthesized when absent
    pub constraint: Option<String>,
}

/// Index membership of a column.
///
/// Fields sharing the same explicit `name` form one multi-column index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexSpec {
    pub name: Option<String>,
    pub unique: bool,
}

/// One column of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: LogicalType,
    /// Characters for strings, bytes for binary, total digits for decimals.
    /// Zero selects the engine maximum (or the decimal default of 18).
    pub size: u32,
    /// Digits after the decimal point.
    pub precision: u32,
    pub nullable: bool,
    pub primary_key: bool,
    pub identity: Option<Identity>,
    pub reference: Option<Reference>,
    pub index: Option<IndexSpec>,
    /// Ignored fields never reach a [`TableDefinition`](super::TableDefinition).
    #[serde(default)]
    pub ignore: bool,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: LogicalType) -> Self {
        Self {
            name: name.into(),
            ty,
            size: 0,
            precision: 0,
            nullable: false,
            primary_key: false,
            identity: None,
            reference: None,
            index: None,
            ignore: false,
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark as identity starting at 1, incrementing by 1.
    pub fn identity(self) -> Self {
        self.identity_from(1, 1)
    }

    pub fn identity_from(mut self, start: i64, increment: i64) -> Self {
        self.identity = Some(Identity { start, increment });
        self
    }

    /// Reference `table.column` through a foreign key.
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.reference = Some(Reference {
            table: table.into(),
            column: column.into(),
            constraint: None,
        });
        self
    }

    /// Name the foreign key constraint. Has no effect without [`Self::references`].
    pub fn constraint(mut self, name: impl Into<String>) -> Self {
        if let Some(reference) = &mut self.reference {
            reference.constraint = Some(name.into());
        }
        self
    }

    pub fn indexed(mut self) -> Self {
        self.index.get_or_insert_with(IndexSpec::default);
        self
    }

    pub fn unique(mut self) -> Self {
        self.index.get_or_insert_with(IndexSpec::default).unique = true;
        self
    }

    pub fn index_named(mut self, name: impl Into<String>) -> Self {
        self.index.get_or_insert_with(IndexSpec::default).name = Some(name.into());
        self
    }

    pub fn ignore(mut self) -> Self {
        self.ignore = true;
        self
    }

    pub fn is_identity(&self) -> bool {
        self.identity.is_some()
    }
}
