//! SQL translation.
//!
//! [`eval`] reduces expressions, [`render`] turns them into fragments through a
//! [`SqlTranslator`], and the per-dialect translators under [`sql`] override the
//! baseline surface where their engine differs.

pub mod ddl;
pub mod dialect;
pub mod dml;
pub mod eval;
pub mod params;
pub mod render;
pub mod sql;
pub mod traits;

#[cfg(test)]
mod tests;

pub use ddl::DdlOp;
pub use dialect::Dialect;
pub use params::Parameters;
pub use render::Compiler;
pub use traits::SqlTranslator;
