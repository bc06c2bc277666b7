//! Schema metadata consumed by the compiler and the DDL translators.
//!
//! Entities register an explicit descriptor through [`Entity::describe`]; the
//! [`SchemaCache`] builds it once per type and shares it afterwards.
//!
//! # Example
//! ```
//! use sqlweave::schema::{Entity, FieldDefinition, LogicalType, SchemaCache, TableBuilder, TableDefinition};
//!
//! struct Order;
//!
//! impl Entity for Order {
//!     fn describe() -> TableBuilder {
//!         TableDefinition::builder("Order")
//!             .table_name("Orders")
//!             .field(FieldDefinition::new("Id", LogicalType::Integer).primary_key().identity())
//!             .field(FieldDefinition::new("Amount", LogicalType::Double))
//!     }
//! }
//!
//! let cache = SchemaCache::new();
//! let table = cache.table::<Order>().unwrap();
//! assert_eq!(table.name(), "Orders");
//! ```

pub mod cache;
pub mod field;
pub mod table;
pub mod types;

pub use self::cache::{Entity, SchemaCache};
pub use self::field::{FieldDefinition, Identity, IndexSpec, Reference};
pub use self::table::{IndexDefinition, TableBuilder, TableDefinition};
pub use self::types::LogicalType;
