//! # sqlweave
//!
//! Typed query construction and SQL translation for MySQL, PostgreSQL,
//! SQL Server, Oracle and SQLite.
//!
//! Entities describe their table once; predicates and projections are built as
//! an explicit expression tree, partially evaluated (captured values and host
//! computations become bound parameters) and rendered through a dialect
//! translator. Nothing here talks to a database: the output is SQL text plus an
//! ordered parameter table.
//!
//! ## Quick Example
//!
//! ```
//! use sqlweave::prelude::*;
//!
//! struct Trade;
//!
//! impl Entity for Trade {
//!     fn describe() -> TableBuilder {
//!         TableDefinition::builder("T")
//!             .field(FieldDefinition::new("Id", LogicalType::Integer).primary_key().identity())
//!             .field(FieldDefinition::new("Amount", LogicalType::Decimal).size(18).precision(2))
//!             .field(FieldDefinition::new("Name", LogicalType::String).size(50))
//!     }
//! }
//!
//! let cache = SchemaCache::new();
//! let translator = Dialect::Generic.translator();
//! let mut query = Query::<Trade>::new(&cache, translator.as_ref())?;
//! query.filter(|t| t.col("Amount").gt(100).and(t.col("Name").eq("x")))?;
//!
//! assert_eq!(
//!     query.build(),
//!     "SELECT T.Id, T.Amount, T.Name FROM T WHERE ((T.Amount > @p0) AND (T.Name = @p1))"
//! );
//! assert_eq!(query.parameters().get("@p1"), Some(&Value::String("x".into())));
//! # Ok::<(), sqlweave::WeaveError>(())
//! ```
//!
//! ## Dialects
//!
//! | Dialect | Quoting | Booleans | Parameters | Limit |
//! |---------|---------|----------|------------|-------|
//! | Generic | none | `true`/`false` | `@p0` | `LIMIT n` |
//! | MySql | `` `x` `` | `1`/`0` | `@p0` | `LIMIT n OFFSET m` |
//! | Postgres | `"x"` | `true`/`false` | `@p0` | `LIMIT n OFFSET m` |
//! | SqlServer | `[x]` | `1`/`0` | `@p0` | `TOP n`, `OFFSET .. FETCH` |
//! | Oracle | `"x"` | `1`/`0` | `:p0` | bound `ROWNUM` window |
//! | Sqlite | `"x"` | `1`/`0` | `@p0` | `LIMIT n OFFSET m` |

pub mod ast;
pub mod config;
pub mod error;
pub mod query;
pub mod schema;
pub mod transpiler;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::{Config, TranslatorOptions};
pub use error::{WeaveError, WeaveResult};
pub use query::Query;
pub use transpiler::{Dialect, Parameters, SqlTranslator};

pub mod prelude {
    pub use crate::ast::builders::sql;
    pub use crate::ast::*;
    pub use crate::config::{Config, TranslatorOptions};
    pub use crate::error::*;
    pub use crate::query::Query;
    pub use crate::schema::{
        Entity, FieldDefinition, LogicalType, SchemaCache, TableBuilder, TableDefinition,
    };
    pub use crate::transpiler::{Dialect, Parameters, SqlTranslator};
}
