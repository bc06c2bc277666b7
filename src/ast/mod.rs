//! Predicate and projection AST.
//!
//! Queries are described with an explicit tree of [`Expr`] nodes built through
//! the typed helpers in [`builders`], then compiled by the transpiler.

pub mod builders;
pub mod expr;
pub mod operators;
pub mod values;

pub use self::builders::IntoExpr;
pub use self::expr::{Callee, EntityRef, Expr, HostError, HostFn, MemberBase};
pub use self::operators::{BinaryOp, Intrinsic, JoinKind, SortOrder, UnaryOp};
pub use self::values::Value;
