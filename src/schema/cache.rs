use std::any::TypeId;
use std::sync::Arc;

use dashmap::DashMap;

use super::{TableBuilder, TableDefinition};
use crate::error::WeaveResult;

/// A type with a registered table descriptor.
pub trait Entity: 'static {
    fn describe() -> TableBuilder;
}

/// Read-through cache of table definitions keyed by entity type.
///
/// Construct one at startup and pass it to the consumers. Concurrent first-time
/// population is safe: a thread that loses the insert race returns the winner's
/// definition, which is value-equal to its own.
#[derive(Debug, Default)]
pub struct SchemaCache {
    tables: DashMap<TypeId, Arc<TableDefinition>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the definition of `T`, describing it on first use.
    pub fn table<T: Entity>(&self) -> WeaveResult<Arc<TableDefinition>> {
        let key = TypeId::of::<T>();

        if let Some(table) = self.tables.get(&key) {
            return Ok(Arc::clone(table.value()));
        }

        let table = Arc::new(T::describe().build()?);
        tracing::debug!(
            "Describing entity '{}' as table '{}' ({} fields)",
            table.entity(),
            table.name(),
            table.fields().len()
        );

        let entry = self.tables.entry(key).or_insert(table);
        Ok(Arc::clone(entry.value()))
    }

    /// Number of cached entity types.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
