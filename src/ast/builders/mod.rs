//! Ergonomic builders for AST expressions.
//!
//! - `predicates` - comparison and logical combinators, operator overloads
//! - `sql` - SQL intrinsics (aggregates, string functions, CAST, IS NULL)
//!
//! # Example
//! ```ignore
//! use sqlweave::ast::builders::sql;
//!
//! let pred = t.col("Amount").gt(10) & t.col("Name").eq("x");
//! let total = sql::sum(t.col("Amount")).alias("Total");
//! ```

pub mod predicates;
pub mod sql;

pub use predicates::IntoExpr;
