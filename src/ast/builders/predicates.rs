//! Comparison, logical and arithmetic combinators for [`Expr`].

use std::ops;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ast::{BinaryOp, Expr, Intrinsic, UnaryOp, Value};

/// Conversion into an expression operand.
pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl IntoExpr for &Expr {
    fn into_expr(self) -> Expr {
        self.clone()
    }
}

macro_rules! constant_into_expr {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoExpr for $ty {
                fn into_expr(self) -> Expr {
                    Expr::Constant(Value::from(self))
                }
            }
        )*
    };
}

constant_into_expr!(bool, i32, u32, i64, f64, Decimal, &str, String, NaiveDateTime, Uuid, Vec<u8>);

impl IntoExpr for Value {
    fn into_expr(self) -> Expr {
        Expr::Constant(self)
    }
}

impl Expr {
    /// `self = rhs`
    pub fn eq(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(BinaryOp::Eq, self, rhs.into_expr())
    }

    /// `self <> rhs`
    pub fn ne(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(BinaryOp::Ne, self, rhs.into_expr())
    }

    pub fn gt(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(BinaryOp::Gt, self, rhs.into_expr())
    }

    pub fn ge(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(BinaryOp::Ge, self, rhs.into_expr())
    }

    pub fn lt(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(BinaryOp::Lt, self, rhs.into_expr())
    }

    pub fn le(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(BinaryOp::Le, self, rhs.into_expr())
    }

    pub fn and(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(BinaryOp::And, self, rhs.into_expr())
    }

    pub fn or(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(BinaryOp::Or, self, rhs.into_expr())
    }

    /// String concatenation, rendered with the dialect's operator.
    pub fn concat(self, rhs: impl IntoExpr) -> Expr {
        Expr::binary(BinaryOp::Concat, self, rhs.into_expr())
    }

    /// `self AS alias`
    pub fn alias(self, alias: &str) -> Expr {
        Expr::intrinsic(Intrinsic::As, vec![self, Expr::Constant(Value::String(alias.to_string()))])
    }

    /// `self BETWEEN low AND high`
    pub fn between(self, low: impl IntoExpr, high: impl IntoExpr) -> Expr {
        Expr::intrinsic(Intrinsic::Between, vec![self, low.into_expr(), high.into_expr()])
    }

    /// `self IN (values...)`
    pub fn in_list<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> Expr {
        let list = Value::List(values.into_iter().map(Into::into).collect());
        Expr::intrinsic(Intrinsic::In, vec![self, Expr::Constant(list)])
    }

    /// `self LIKE pattern`
    pub fn like(self, pattern: impl IntoExpr) -> Expr {
        Expr::intrinsic(Intrinsic::Like, vec![self, pattern.into_expr()])
    }
}

impl ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::unary(UnaryOp::Not, self)
    }
}

impl ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::unary(UnaryOp::Neg, self)
    }
}

macro_rules! binary_ops {
    ($($trait:ident :: $method:ident => $op:expr),* $(,)?) => {
        $(
            impl<R: IntoExpr> ops::$trait<R> for Expr {
                type Output = Expr;

                fn $method(self, rhs: R) -> Expr {
                    Expr::binary($op, self, rhs.into_expr())
                }
            }
        )*
    };
}

binary_ops! {
    BitAnd::bitand => BinaryOp::And,
    BitOr::bitor => BinaryOp::Or,
    Add::add => BinaryOp::Add,
    Sub::sub => BinaryOp::Sub,
    Mul::mul => BinaryOp::Mul,
    Div::div => BinaryOp::Div,
    Rem::rem => BinaryOp::Rem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_overloads_build_binary_nodes() {
        let expr = Expr::constant(1) + 2;
        assert!(matches!(expr, Expr::Binary { op: BinaryOp::Add, .. }));

        let expr = Expr::constant(true) & Expr::constant(false);
        assert!(matches!(expr, Expr::Binary { op: BinaryOp::And, .. }));

        let expr = !Expr::constant(1).eq(1);
        assert!(matches!(expr, Expr::Unary { op: UnaryOp::Not, .. }));
    }

    #[test]
    fn test_in_list_wraps_values() {
        let expr = Expr::raw("x").in_list([1, 2, 3]);
        let Expr::Call { args, .. } = expr else {
            panic!("expected call");
        };
        assert_eq!(
            args[1].as_constant(),
            Some(&Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
        );
    }
}
