use serde::Serialize;

use super::{FieldDefinition, IndexSpec};
use crate::error::{WeaveError, WeaveResult};

/// Immutable description of one entity's table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDefinition {
    entity: String,
    name: String,
    fields: Vec<FieldDefinition>,
    id_field: Option<usize>,
}

/// An index derived from the fields of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDefinition {
    /// Explicit name; `None` means the translator synthesizes `IX_<table>_<cols>`.
    pub name: Option<String>,
    pub columns: Vec<String>,
    pub unique: bool,
}

/// Fluent builder producing a [`TableDefinition`].
#[derive(Debug, Clone)]
pub struct TableBuilder {
    entity: String,
    name: Option<String>,
    fields: Vec<FieldDefinition>,
}

impl TableDefinition {
    /// Start describing the entity `entity`. The table name defaults to the entity name.
    pub fn builder(entity: impl Into<String>) -> TableBuilder {
        TableBuilder {
            entity: entity.into(),
            name: None,
            fields: Vec::new(),
        }
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The primary key field, when exactly one field is marked as primary key.
    pub fn id_field(&self) -> Option<&FieldDefinition> {
        self.id_field.map(|i| &self.fields[i])
    }

    pub fn identity_field(&self) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.is_identity())
    }

    pub fn primary_keys(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.primary_key)
    }

    /// Fields carrying a foreign key reference.
    pub fn references(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.reference.is_some())
    }

    /// Indexes declared by the fields. Fields sharing an explicit index name are
    /// grouped into a single index in declaration order.
    pub fn indexes(&self) -> Vec<IndexDefinition> {
        let mut indexes: Vec<IndexDefinition> = Vec::new();

        for field in &self.fields {
            let Some(IndexSpec { name, unique }) = &field.index else {
                continue;
            };

            let existing = name
                .as_ref()
                .and_then(|n| indexes.iter_mut().find(|ix| ix.name.as_ref() == Some(n)));

            match existing {
                Some(index) => {
                    index.columns.push(field.name.clone());
                    index.unique |= *unique;
                }
                None => indexes.push(IndexDefinition {
                    name: name.clone(),
                    columns: vec![field.name.clone()],
                    unique: *unique,
                }),
            }
        }

        indexes
    }
}

impl TableBuilder {
    /// Override the table name (defaults to the entity name).
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> WeaveResult<TableDefinition> {
        let name = self.name.unwrap_or_else(|| self.entity.clone());
        let fields: Vec<FieldDefinition> = self.fields.into_iter().filter(|f| !f.ignore).collect();

        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(WeaveError::InvalidSchema(format!(
                    "duplicate field '{}' on '{}'",
                    field.name, name
                )));
            }
            if field.is_identity() && !field.ty.is_integral() {
                return Err(WeaveError::InvalidSchema(format!(
                    "identity field '{}.{}' must be integral, found {}",
                    name, field.name, field.ty
                )));
            }
        }

        if fields.iter().filter(|f| f.is_identity()).count() > 1 {
            return Err(WeaveError::InvalidSchema(format!(
                "table '{}' declares more than one identity field",
                name
            )));
        }

        let mut pks = fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.primary_key)
            .map(|(i, _)| i);
        let id_field = match (pks.next(), pks.next()) {
            (Some(i), None) => Some(i),
            _ => None,
        };

        Ok(TableDefinition {
            entity: self.entity,
            name,
            fields,
            id_field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LogicalType;

    fn customer() -> TableBuilder {
        TableDefinition::builder("Customer")
            .field(FieldDefinition::new("Id", LogicalType::Integer).primary_key().identity())
            .field(FieldDefinition::new("Email", LogicalType::String).size(120).unique())
            .field(FieldDefinition::new("First", LogicalType::String).index_named("IX_Name"))
            .field(FieldDefinition::new("Last", LogicalType::String).index_named("IX_Name"))
            .field(FieldDefinition::new("Cached", LogicalType::String).ignore())
    }

    #[test]
    fn test_builder_derives_id_and_skips_ignored() {
        let table = customer().build().unwrap();
        assert_eq!(table.name(), "Customer");
        assert_eq!(table.fields().len(), 4);
        assert!(table.field("Cached").is_none());
        assert_eq!(table.id_field().map(|f| f.name.as_str()), Some("Id"));
        assert_eq!(table.identity_field().map(|f| f.name.as_str()), Some("Id"));
    }

    #[test]
    fn test_indexes_group_by_name() {
        let table = customer().build().unwrap();
        let indexes = table.indexes();
        assert_eq!(indexes.len(), 2);
        assert_eq!(indexes[0].columns, vec!["Email"]);
        assert!(indexes[0].unique);
        assert_eq!(indexes[1].name.as_deref(), Some("IX_Name"));
        assert_eq!(indexes[1].columns, vec!["First", "Last"]);
    }

    #[test]
    fn test_composite_key_has_no_id_field() {
        let table = TableDefinition::builder("Link")
            .field(FieldDefinition::new("A", LogicalType::Integer).primary_key())
            .field(FieldDefinition::new("B", LogicalType::Integer).primary_key())
            .build()
            .unwrap();
        assert!(table.id_field().is_none());
        assert_eq!(table.primary_keys().count(), 2);
    }

    #[test]
    fn test_rejects_text_identity() {
        let err = TableDefinition::builder("Bad")
            .field(FieldDefinition::new("Code", LogicalType::String).identity())
            .build()
            .unwrap_err();
        assert!(matches!(err, WeaveError::InvalidSchema(_)));
    }

    #[test]
    fn test_rejects_duplicate_fields() {
        let err = TableDefinition::builder("Bad")
            .field(FieldDefinition::new("Id", LogicalType::Integer))
            .field(FieldDefinition::new("Id", LogicalType::Long))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("duplicate field 'Id'"));
    }
}
