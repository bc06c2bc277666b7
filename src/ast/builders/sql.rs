//! SQL intrinsics, declared on the `Sql` marker type.

use crate::ast::{Expr, Intrinsic, IntoExpr, Value};
use crate::schema::LogicalType;

/// MIN(expr)
pub fn min(expr: impl IntoExpr) -> Expr {
    Expr::intrinsic(Intrinsic::Min, vec![expr.into_expr()])
}

/// MAX(expr)
pub fn max(expr: impl IntoExpr) -> Expr {
    Expr::intrinsic(Intrinsic::Max, vec![expr.into_expr()])
}

/// SUM(expr)
pub fn sum(expr: impl IntoExpr) -> Expr {
    Expr::intrinsic(Intrinsic::Sum, vec![expr.into_expr()])
}

/// AVG(expr)
pub fn average(expr: impl IntoExpr) -> Expr {
    Expr::intrinsic(Intrinsic::Average, vec![expr.into_expr()])
}

/// COUNT(*)
pub fn count() -> Expr {
    Expr::intrinsic(Intrinsic::Count, vec![])
}

/// COUNT(expr)
pub fn count_of(expr: impl IntoExpr) -> Expr {
    Expr::intrinsic(Intrinsic::Count, vec![expr.into_expr()])
}

/// Trim surrounding whitespace in SQL.
pub fn trim(expr: impl IntoExpr) -> Expr {
    Expr::intrinsic(Intrinsic::TrimSql, vec![expr.into_expr()])
}

/// String length, using the dialect's length function.
pub fn length(expr: impl IntoExpr) -> Expr {
    Expr::intrinsic(Intrinsic::Length, vec![expr.into_expr()])
}

pub fn upper(expr: impl IntoExpr) -> Expr {
    Expr::intrinsic(Intrinsic::Upper, vec![expr.into_expr()])
}

pub fn lower(expr: impl IntoExpr) -> Expr {
    Expr::intrinsic(Intrinsic::Lower, vec![expr.into_expr()])
}

/// NULL-coalesce, using the dialect's function (COALESCE, ISNULL, IFNULL, NVL).
pub fn is_null(expr: impl IntoExpr, fallback: impl IntoExpr) -> Expr {
    Expr::intrinsic(Intrinsic::IsNull, vec![expr.into_expr(), fallback.into_expr()])
}

/// CAST(expr AS type)
pub fn cast(expr: impl IntoExpr, ty: LogicalType) -> Expr {
    cast_sized(expr, ty, 0)
}

/// CAST(expr AS type(size))
pub fn cast_sized(expr: impl IntoExpr, ty: LogicalType, size: u32) -> Expr {
    Expr::intrinsic(
        Intrinsic::Cast,
        vec![
            expr.into_expr(),
            Expr::Constant(Value::String(ty.to_string())),
            Expr::Constant(Value::Int(size as i64)),
        ],
    )
}
