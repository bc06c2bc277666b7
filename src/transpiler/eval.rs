//! Partial evaluator.
//!
//! Reduces an [`Expr`] until every remaining node is either a column reference,
//! a recognized SQL intrinsic or an operator over those. Everything the host can
//! compute (captured variables, arithmetic over constants, host function calls)
//! is folded into [`Expr::Constant`]. Children are visited left to right, so the
//! order constants appear in the reduced tree is the order they are bound.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use tracing::trace;

use crate::ast::{BinaryOp, Expr, Intrinsic, MemberBase, UnaryOp, Value};
use crate::error::{WeaveError, WeaveResult};
use crate::schema::LogicalType;

/// Where an expression appears.
///
/// In predicate position a standalone boolean column means `column = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Predicate,
    Value,
}

/// Reduce `expr` to its SQL-translatable form.
pub fn partial_eval(expr: Expr, position: Position) -> WeaveResult<Expr> {
    match expr {
        Expr::Constant(v) => Ok(Expr::Constant(v)),
        Expr::Member { base, name } => member(base, name, position),
        Expr::Unary { op, operand } => unary(op, *operand),
        Expr::Binary { op, lhs, rhs } => binary(op, *lhs, *rhs),
        Expr::Call { callee, args } => {
            if let Some(intrinsic) = callee.intrinsic_tag() {
                let args = eval_all(args)?;
                check_arity(intrinsic, &args)?;
                return Ok(Expr::intrinsic(intrinsic, args));
            }

            let Some(func) = callee.host_fn().cloned() else {
                return Err(WeaveError::unsupported(format!(
                    "call to {}::{} has no SQL translation",
                    callee.declaring, callee.name
                )));
            };

            let args = eval_all(args)?;
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                match arg {
                    Expr::Constant(v) => values.push(v),
                    _ => {
                        return Err(WeaveError::unsupported(format!(
                            "host call '{}' depends on column values",
                            callee.name
                        )));
                    }
                }
            }

            trace!(name = %callee.name, args = values.len(), "folding host call");
            func(&values)
                .map(Expr::Constant)
                .map_err(|e| WeaveError::host_call(callee.name.clone(), e.to_string()))
        }
        Expr::Tuple(items) => {
            let items = eval_all(items)?;
            if items.iter().all(Expr::is_constant) {
                let values = items
                    .into_iter()
                    .filter_map(|e| match e {
                        Expr::Constant(v) => Some(v),
                        _ => None,
                    })
                    .collect();
                Ok(Expr::Constant(Value::Tuple(values)))
            } else {
                Ok(Expr::Tuple(items))
            }
        }
    }
}

fn eval_all(items: Vec<Expr>) -> WeaveResult<Vec<Expr>> {
    items
        .into_iter()
        .map(|e| partial_eval(e, Position::Value))
        .collect()
}

fn member(base: MemberBase, name: String, position: Position) -> WeaveResult<Expr> {
    match base {
        MemberBase::Entity(entity) => {
            let table = entity.table();
            let Some(field) = table.field(&name) else {
                return Err(WeaveError::unsupported(format!(
                    "'{}' has no column '{}'",
                    table.entity(),
                    name
                )));
            };

            let is_flag = field.ty == LogicalType::Boolean;
            let column = Expr::Member {
                base: MemberBase::Entity(entity),
                name,
            };
            if is_flag && position == Position::Predicate {
                Ok(Expr::binary(BinaryOp::Eq, column, Expr::Constant(Value::Bool(true))))
            } else {
                Ok(column)
            }
        }
        MemberBase::Expr(inner) => match partial_eval(*inner, Position::Value)? {
            Expr::Constant(container) => container
                .field(&name)
                .cloned()
                .map(Expr::Constant)
                .ok_or_else(|| {
                    WeaveError::unsupported(format!(
                        "{} value has no member '{}'",
                        container.kind(),
                        name
                    ))
                }),
            other => Err(WeaveError::unsupported(format!(
                "member '{}' of a non-constant expression {:?}",
                name, other
            ))),
        },
    }
}

fn unary(op: UnaryOp, operand: Expr) -> WeaveResult<Expr> {
    match op {
        UnaryOp::Not => match partial_eval(operand, Position::Predicate)? {
            Expr::Binary { op, lhs, rhs } if op.is_comparison() => {
                let inverted = op.inverse().unwrap_or(op);
                Ok(Expr::Binary {
                    op: inverted,
                    lhs,
                    rhs,
                })
            }
            Expr::Constant(Value::Bool(b)) => Ok(Expr::Constant(Value::Bool(!b))),
            other => Ok(Expr::unary(UnaryOp::Not, other)),
        },
        UnaryOp::Neg => match partial_eval(operand, Position::Value)? {
            Expr::Constant(Value::Int(i)) => i
                .checked_neg()
                .map(|n| Expr::Constant(Value::Int(n)))
                .ok_or_else(|| WeaveError::unsupported("integer overflow in negation")),
            Expr::Constant(Value::Float(f)) => Ok(Expr::Constant(Value::Float(-f))),
            Expr::Constant(Value::Decimal(d)) => Ok(Expr::Constant(Value::Decimal(-d))),
            other => Ok(Expr::unary(UnaryOp::Neg, other)),
        },
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> WeaveResult<Expr> {
    let child = if op.is_logical() {
        Position::Predicate
    } else {
        Position::Value
    };
    let lhs = partial_eval(lhs, child)?;
    let rhs = partial_eval(rhs, child)?;

    let foldable = !op.is_logical() && !op.is_comparison();
    match (lhs, rhs) {
        (Expr::Constant(l), Expr::Constant(r)) if foldable && !is_raw(&l) && !is_raw(&r) => {
            fold(op, l, r).map(Expr::Constant)
        }
        (Expr::Constant(l), Expr::Constant(r)) if op.is_comparison() && !is_raw(&l) && !is_raw(&r) => {
            match compare(op, &l, &r) {
                Some(b) => Ok(Expr::Constant(Value::Bool(b))),
                None => Ok(Expr::binary(op, Expr::Constant(l), Expr::Constant(r))),
            }
        }
        (lhs, rhs) if op.is_logical() => Ok(logical(op, lhs, rhs)),
        (lhs, rhs) => Ok(Expr::binary(op, lhs, rhs)),
    }
}

/// Drop constant operands of AND/OR; a deciding constant replaces the whole node.
fn logical(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let decides = op == BinaryOp::Or;
    let constant = |e: &Expr| e.as_constant().and_then(Value::as_bool);
    match (constant(&lhs), constant(&rhs)) {
        (Some(b), _) | (_, Some(b)) if b == decides => Expr::Constant(Value::Bool(b)),
        (Some(_), _) => rhs,
        (_, Some(_)) => lhs,
        _ => Expr::binary(op, lhs, rhs),
    }
}

/// Evaluate a comparison between two constants; `None` when they don't compare.
fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> Option<bool> {
    let ordering = match (lhs, rhs) {
        (Value::Bool(l), Value::Bool(r)) => l.partial_cmp(r),
        (Value::String(l), Value::String(r)) => l.partial_cmp(r),
        (Value::DateTime(l), Value::DateTime(r)) => l.partial_cmp(r),
        (Value::Guid(l), Value::Guid(r)) => l.partial_cmp(r),
        (Value::Int(l), Value::Int(r)) => l.partial_cmp(r),
        (Value::Decimal(_), _) | (_, Value::Decimal(_)) => {
            as_decimal(lhs)?.partial_cmp(&as_decimal(rhs)?)
        }
        _ => as_f64(lhs)?.partial_cmp(&as_f64(rhs)?),
    }?;
    Some(match op {
        BinaryOp::Eq => ordering == Ordering::Equal,
        BinaryOp::Ne => ordering != Ordering::Equal,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::Ge => ordering != Ordering::Less,
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::Le => ordering != Ordering::Greater,
        _ => return None,
    })
}

fn is_raw(v: &Value) -> bool {
    matches!(v, Value::Sql(_) | Value::Null)
}

/// Evaluate an arithmetic or concatenation operator over two constants.
fn fold(op: BinaryOp, lhs: Value, rhs: Value) -> WeaveResult<Value> {
    let mismatch = || {
        WeaveError::unsupported(format!(
            "cannot apply '{}' to {} and {}",
            op,
            lhs.kind(),
            rhs.kind()
        ))
    };

    let text = matches!(lhs, Value::String(_)) || matches!(rhs, Value::String(_));
    if op == BinaryOp::Concat || (op == BinaryOp::Add && text) {
        return match (plain_text(&lhs), plain_text(&rhs)) {
            (Some(l), Some(r)) => Ok(Value::String(l + &r)),
            _ => Err(mismatch()),
        };
    }

    match (&lhs, &rhs) {
        (Value::Int(l), Value::Int(r)) => {
            let result = match op {
                BinaryOp::Add => l.checked_add(*r),
                BinaryOp::Sub => l.checked_sub(*r),
                BinaryOp::Mul => l.checked_mul(*r),
                BinaryOp::Div => l.checked_div(*r),
                BinaryOp::Rem => l.checked_rem(*r),
                _ => None,
            };
            result
                .map(Value::Int)
                .ok_or_else(|| WeaveError::unsupported(format!("cannot fold {} {} {}", l, op, r)))
        }
        (Value::Decimal(_), _) | (_, Value::Decimal(_)) => match (as_decimal(&lhs), as_decimal(&rhs)) {
            (Some(l), Some(r)) => fold_decimal(op, l, r).map(Value::Decimal),
            _ => Err(mismatch()),
        },
        _ => match (as_f64(&lhs), as_f64(&rhs)) {
            (Some(l), Some(r)) => Ok(Value::Float(match op {
                BinaryOp::Add => l + r,
                BinaryOp::Sub => l - r,
                BinaryOp::Mul => l * r,
                BinaryOp::Div => l / r,
                BinaryOp::Rem => l % r,
                _ => return Err(mismatch()),
            })),
            _ => Err(mismatch()),
        },
    }
}

fn fold_decimal(op: BinaryOp, l: Decimal, r: Decimal) -> WeaveResult<Decimal> {
    let result = match op {
        BinaryOp::Add => l.checked_add(r),
        BinaryOp::Sub => l.checked_sub(r),
        BinaryOp::Mul => l.checked_mul(r),
        BinaryOp::Div => l.checked_div(r),
        BinaryOp::Rem => l.checked_rem(r),
        _ => None,
    };
    result.ok_or_else(|| WeaveError::unsupported(format!("cannot fold {} {} {}", l, op, r)))
}

fn as_decimal(v: &Value) -> Option<Decimal> {
    match v {
        Value::Int(i) => Some(Decimal::from(*i)),
        Value::Decimal(d) => Some(*d),
        _ => None,
    }
}

fn as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}

fn plain_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Decimal(d) => Some(d.to_string()),
        Value::Guid(g) => Some(g.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Minimum and maximum argument counts of an intrinsic.
fn check_arity(intrinsic: Intrinsic, args: &[Expr]) -> WeaveResult<()> {
    let (min, max) = match intrinsic {
        Intrinsic::Count => (0, 1),
        Intrinsic::Min
        | Intrinsic::Max
        | Intrinsic::Sum
        | Intrinsic::Average
        | Intrinsic::TrimSql
        | Intrinsic::Length
        | Intrinsic::Upper
        | Intrinsic::Lower => (1, 1),
        Intrinsic::As | Intrinsic::In | Intrinsic::Like | Intrinsic::IsNull => (2, 2),
        Intrinsic::Between => (3, 3),
        Intrinsic::Cast => (2, 3),
    };
    if args.len() < min || args.len() > max {
        return Err(WeaveError::unsupported(format!(
            "Sql.{} takes {} argument(s), got {}",
            intrinsic.name(),
            if min == max { min.to_string() } else { format!("{}..={}", min, max) },
            args.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::sql;
    use crate::ast::{Callee, EntityRef};
    use crate::schema::{FieldDefinition, TableDefinition};
    use std::sync::Arc;

    fn orders() -> EntityRef {
        let table = TableDefinition::builder("Order")
            .field(FieldDefinition::new("Id", LogicalType::Integer).primary_key())
            .field(FieldDefinition::new("Amount", LogicalType::Decimal))
            .field(FieldDefinition::new("Shipped", LogicalType::Boolean))
            .build()
            .unwrap();
        EntityRef::new(Arc::new(table))
    }

    fn op_of(expr: &Expr) -> Option<BinaryOp> {
        match expr {
            Expr::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }

    #[test]
    fn test_captured_member_becomes_constant() {
        let captured = Value::record([("limit", 10)]);
        let expr = Expr::captured(captured, "limit");
        let out = partial_eval(expr, Position::Value).unwrap();
        assert_eq!(out.as_constant(), Some(&Value::Int(10)));
    }

    #[test]
    fn test_missing_captured_member_is_unsupported() {
        let expr = Expr::captured(Value::record([("a", 1)]), "b");
        let err = partial_eval(expr, Position::Value).unwrap_err();
        assert!(matches!(err, WeaveError::UnsupportedExpression(_)));
    }

    #[test]
    fn test_unknown_column_is_unsupported() {
        let err = partial_eval(orders().col("Nope"), Position::Value).unwrap_err();
        assert!(err.to_string().contains("Nope"));
    }

    #[test]
    fn test_not_inverts_comparison() {
        let t = orders();
        let out = partial_eval(!t.col("Amount").gt(5), Position::Predicate).unwrap();
        assert_eq!(op_of(&out), Some(BinaryOp::Le));
    }

    #[test]
    fn test_boolean_column_in_predicate_position() {
        let t = orders();
        let out = partial_eval(t.col("Shipped"), Position::Predicate).unwrap();
        assert_eq!(op_of(&out), Some(BinaryOp::Eq));

        let negated = partial_eval(!t.col("Shipped"), Position::Predicate).unwrap();
        assert_eq!(op_of(&negated), Some(BinaryOp::Ne));

        let projected = partial_eval(t.col("Shipped"), Position::Value).unwrap();
        assert!(matches!(projected, Expr::Member { .. }));
    }

    #[test]
    fn test_arithmetic_over_constants_folds() {
        let expr = Expr::constant(2) * Expr::constant(21);
        let out = partial_eval(expr, Position::Value).unwrap();
        assert_eq!(out.as_constant(), Some(&Value::Int(42)));

        let text = Expr::constant("a").concat("b");
        let out = partial_eval(text, Position::Value).unwrap();
        assert_eq!(out.as_constant(), Some(&Value::String("ab".into())));
    }

    #[test]
    fn test_comparison_over_constants_folds() {
        let out = partial_eval(Expr::constant(5).gt(0), Position::Predicate).unwrap();
        assert_eq!(out.as_constant(), Some(&Value::Bool(true)));

        let out = partial_eval(Expr::constant("b").le("a"), Position::Predicate).unwrap();
        assert_eq!(out.as_constant(), Some(&Value::Bool(false)));

        let limits = Value::record([("Max", Value::Decimal(Decimal::new(150, 2)))]);
        let out = partial_eval(Expr::captured(limits, "Max").eq(Expr::constant(1.5)), Position::Predicate)
            .unwrap();
        assert_eq!(op_of(&out), Some(BinaryOp::Eq));

        let null = partial_eval(Expr::constant(1).ne(Expr::Constant(Value::Null)), Position::Predicate)
            .unwrap();
        assert_eq!(op_of(&null), Some(BinaryOp::Ne));
    }

    #[test]
    fn test_constant_logic_operands_are_dropped() {
        let t = orders();
        let kept = partial_eval(Expr::constant(1).lt(2).and(t.col("Amount").gt(5)), Position::Predicate)
            .unwrap();
        assert_eq!(op_of(&kept), Some(BinaryOp::Gt));

        let decided = partial_eval(t.col("Amount").gt(5).or(Expr::constant(1).lt(2)), Position::Predicate)
            .unwrap();
        assert_eq!(decided.as_constant(), Some(&Value::Bool(true)));

        let empty = partial_eval(t.col("Amount").gt(5).and(Expr::constant(2).lt(1)), Position::Predicate)
            .unwrap();
        assert_eq!(empty.as_constant(), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_host_call_is_folded() {
        let expr = Expr::host_call("Double", vec![Expr::constant(4)], |args| match args {
            [Value::Int(i)] => Ok(Value::Int(i * 2)),
            _ => Err("bad args".into()),
        });
        let out = partial_eval(expr, Position::Value).unwrap();
        assert_eq!(out.as_constant(), Some(&Value::Int(8)));
    }

    #[test]
    fn test_host_call_failure_is_reported() {
        let expr = Expr::host_call("Explode", vec![], |_| Err("boom".into()));
        let err = partial_eval(expr, Position::Value).unwrap_err();
        assert!(matches!(err, WeaveError::HostCall { ref name, .. } if name == "Explode"));
    }

    #[test]
    fn test_host_call_over_column_is_unsupported() {
        let t = orders();
        let expr = Expr::host_call("Round", vec![t.col("Amount")], |_| Ok(Value::Null));
        assert!(partial_eval(expr, Position::Value).is_err());
    }

    #[test]
    fn test_same_name_on_other_type_is_not_intrinsic() {
        let t = orders();
        let expr = Expr::call(Callee::declared("String", "Length"), vec![t.col("Amount")]);
        assert!(partial_eval(expr, Position::Value).is_err());

        let intrinsic = Expr::call(Callee::declared("Sql", "Length"), vec![t.col("Amount")]);
        assert!(matches!(
            partial_eval(intrinsic, Position::Value).unwrap(),
            Expr::Call { .. }
        ));
    }

    #[test]
    fn test_intrinsic_arity() {
        let t = orders();
        let bad = Expr::intrinsic(Intrinsic::Between, vec![t.col("Amount")]);
        assert!(partial_eval(bad, Position::Predicate).is_err());
        assert!(partial_eval(sql::count(), Position::Value).is_ok());
    }

    #[test]
    fn test_tuple_of_constants_collapses() {
        let out = partial_eval(
            Expr::tuple([Expr::constant(1), Expr::constant("x")]),
            Position::Value,
        )
        .unwrap();
        assert_eq!(
            out.as_constant(),
            Some(&Value::Tuple(vec![Value::Int(1), Value::String("x".into())]))
        );

        let t = orders();
        let mixed = partial_eval(Expr::tuple([t.col("Id"), Expr::constant(1)]), Position::Value)
            .unwrap();
        assert!(matches!(mixed, Expr::Tuple(ref items) if items.len() == 2));
    }
}
