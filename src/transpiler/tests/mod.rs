//! Transpiler test modules.
//!
//! - `compile`: expression rendering through the translators
//! - `dialects`: per-dialect literals, types, pagination and catalog checks
//! - `ddl`: CREATE/DROP planning and idempotency guards
//! - `dml`: identity-based insert/update/delete/select

mod dialects;

use crate::ast::{EntityRef, Expr};
use crate::config::TranslatorOptions;
use crate::fixtures::Order;
use crate::schema::SchemaCache;
use crate::transpiler::{Compiler, Dialect, Parameters, SqlTranslator};

fn orders() -> EntityRef {
    EntityRef::new(SchemaCache::new().table::<Order>().unwrap())
}

/// Compile a predicate over `Orders` with the given translator.
fn predicate_with(
    translator: &dyn SqlTranslator,
    f: impl FnOnce(&EntityRef) -> Expr,
) -> (String, Parameters) {
    let mut params = translator.new_parameters();
    let sql = Compiler::new(translator, &mut params)
        .predicate(f(&orders()))
        .unwrap();
    (sql, params)
}

fn predicate(dialect: Dialect, f: impl FnOnce(&EntityRef) -> Expr) -> (String, Parameters) {
    predicate_with(dialect.translator().as_ref(), f)
}

fn projection(dialect: Dialect, f: impl FnOnce(&EntityRef) -> Expr) -> String {
    let translator = dialect.translator_with(TranslatorOptions::default());
    let mut params = translator.new_parameters();
    Compiler::new(translator.as_ref(), &mut params)
        .projection(f(&orders()))
        .unwrap()
}
