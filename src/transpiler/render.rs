//! Renders reduced expressions into SQL fragments through a translator,
//! binding constants into the query's parameters as they are met.

use std::str::FromStr;

use super::eval::{Position, partial_eval};
use super::params::Parameters;
use super::traits::SqlTranslator;
use crate::ast::{BinaryOp, Expr, Intrinsic, MemberBase, SortOrder, Value};
use crate::error::{WeaveError, WeaveResult};
use crate::schema::LogicalType;

/// Compiles expressions for one query: partial evaluation, then rendering.
pub struct Compiler<'a> {
    translator: &'a dyn SqlTranslator,
    params: &'a mut Parameters,
}

impl<'a> Compiler<'a> {
    pub fn new(translator: &'a dyn SqlTranslator, params: &'a mut Parameters) -> Self {
        Self { translator, params }
    }

    /// Compile a boolean condition (WHERE, HAVING, JOIN ... ON).
    pub fn predicate(&mut self, expr: Expr) -> WeaveResult<String> {
        match partial_eval(expr, Position::Predicate)? {
            Expr::Constant(Value::Bool(b)) => {
                Ok(self.translator.format_binary(BinaryOp::Eq, "1", if b { "1" } else { "0" }))
            }
            reduced => self.render(&reduced),
        }
    }

    /// Compile a projection (SELECT list, GROUP BY); tuples become comma lists.
    pub fn projection(&mut self, expr: Expr) -> WeaveResult<String> {
        let reduced = partial_eval(expr, Position::Value)?;
        self.render(&reduced)
    }

    /// Compile an ORDER BY list; every tuple item carries the direction.
    pub fn ordering(&mut self, expr: Expr, order: SortOrder) -> WeaveResult<String> {
        let suffix = match order {
            SortOrder::Asc => "",
            SortOrder::Desc => " DESC",
        };
        match partial_eval(expr, Position::Value)? {
            Expr::Tuple(items) => {
                let rendered = items
                    .iter()
                    .map(|item| self.render(item).map(|sql| sql + suffix))
                    .collect::<WeaveResult<Vec<_>>>()?;
                Ok(rendered.join(", "))
            }
            reduced => Ok(self.render(&reduced)? + suffix),
        }
    }

    fn render(&mut self, expr: &Expr) -> WeaveResult<String> {
        match expr {
            Expr::Member {
                base: MemberBase::Entity(entity),
                name,
            } => Ok(self.translator.column_ref(entity.table().name(), name)),
            Expr::Member { name, .. } => Err(WeaveError::unsupported(format!(
                "unresolved member '{}'",
                name
            ))),
            Expr::Constant(value) => self.constant(value),
            Expr::Binary { op, lhs, rhs } => self.binary(*op, lhs, rhs),
            Expr::Unary { op, operand } => {
                let operand = self.render(operand)?;
                Ok(self.translator.format_unary(*op, &operand))
            }
            Expr::Call { callee, args } => match callee.intrinsic_tag() {
                Some(intrinsic) => self.intrinsic(intrinsic, args),
                None => Err(WeaveError::unsupported(format!(
                    "call to {}::{} survived evaluation",
                    callee.declaring, callee.name
                ))),
            },
            Expr::Tuple(items) => {
                let rendered = items
                    .iter()
                    .map(|item| self.render(item))
                    .collect::<WeaveResult<Vec<_>>>()?;
                Ok(rendered.join(", "))
            }
        }
    }

    fn binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> WeaveResult<String> {
        if matches!(op, BinaryOp::Eq | BinaryOp::Ne) {
            let null_side = match (lhs, rhs) {
                (_, Expr::Constant(Value::Null)) => Some(lhs),
                (Expr::Constant(Value::Null), _) => Some(rhs),
                _ => None,
            };
            if let Some(operand) = null_side {
                let operand = self.render(operand)?;
                let test = if op == BinaryOp::Eq { "IS NULL" } else { "IS NOT NULL" };
                return Ok(format!("({} {})", operand, test));
            }
        }

        let lhs = self.render(lhs)?;
        let rhs = self.render(rhs)?;
        Ok(self.translator.format_binary(op, &lhs, &rhs))
    }

    fn constant(&mut self, value: &Value) -> WeaveResult<String> {
        match value {
            Value::Null => Ok("NULL".to_string()),
            Value::Bool(b) => Ok(self.translator.bool_literal(*b)),
            Value::Sql(sql) => Ok(sql.clone()),
            Value::List(items) | Value::Tuple(items) => {
                let rendered = items
                    .iter()
                    .map(|item| self.constant(item))
                    .collect::<WeaveResult<Vec<_>>>()?;
                Ok(format!("({})", rendered.join(", ")))
            }
            Value::Record(_) => Err(WeaveError::unsupported(
                "a captured container cannot be used as a value",
            )),
            other => Ok(self.params.add(other.clone())),
        }
    }

    /// Render a BETWEEN bound; datetimes may be embedded as literals.
    fn bound(&mut self, expr: &Expr) -> WeaveResult<String> {
        match expr {
            Expr::Constant(Value::DateTime(dt)) if !self.translator.options().bind_between_datetimes => {
                Ok(self.translator.datetime_literal(dt))
            }
            other => self.render(other),
        }
    }

    fn intrinsic(&mut self, intrinsic: Intrinsic, args: &[Expr]) -> WeaveResult<String> {
        let arg = |i: usize| {
            args.get(i).ok_or_else(|| {
                WeaveError::unsupported(format!("Sql.{} is missing argument {}", intrinsic.name(), i))
            })
        };

        match intrinsic {
            Intrinsic::Min | Intrinsic::Max | Intrinsic::Sum | Intrinsic::Average => {
                let name = match intrinsic {
                    Intrinsic::Min => "MIN",
                    Intrinsic::Max => "MAX",
                    Intrinsic::Sum => "SUM",
                    _ => "AVG",
                };
                Ok(format!("{}({})", name, self.render(arg(0)?)?))
            }
            Intrinsic::Count => match args.first() {
                None => Ok("COUNT(*)".to_string()),
                Some(expr) => Ok(format!("COUNT({})", self.render(expr)?)),
            },
            Intrinsic::As => {
                let Expr::Constant(Value::String(alias)) = arg(1)? else {
                    return Err(WeaveError::unsupported("Sql.As needs a constant alias"));
                };
                let operand = self.render(arg(0)?)?;
                Ok(format!("{} AS {}", operand, self.translator.quote_identifier(alias)))
            }
            Intrinsic::Between => {
                let operand = self.render(arg(0)?)?;
                let low = self.bound(arg(1)?)?;
                let high = self.bound(arg(2)?)?;
                Ok(format!("({} BETWEEN {} AND {})", operand, low, high))
            }
            Intrinsic::In => {
                let operand = self.render(arg(0)?)?;
                match arg(1)? {
                    Expr::Constant(Value::List(items)) | Expr::Constant(Value::Tuple(items)) if items.is_empty() => {
                        Ok(self.translator.format_binary(BinaryOp::Eq, "1", "0"))
                    }
                    Expr::Constant(list @ (Value::List(_) | Value::Tuple(_))) => {
                        let list = self.constant(list)?;
                        Ok(format!("({} IN {})", operand, list))
                    }
                    other => {
                        let values = self.render(other)?;
                        Ok(format!("({} IN ({}))", operand, values))
                    }
                }
            }
            Intrinsic::Like => {
                let operand = self.render(arg(0)?)?;
                let pattern = self.render(arg(1)?)?;
                Ok(format!("({} LIKE {})", operand, pattern))
            }
            Intrinsic::TrimSql => {
                let operand = self.render(arg(0)?)?;
                Ok(self.translator.trim(&operand))
            }
            Intrinsic::Length => {
                let operand = self.render(arg(0)?)?;
                Ok(format!("{}({})", self.translator.length_function(), operand))
            }
            Intrinsic::Upper => Ok(format!("UPPER({})", self.render(arg(0)?)?)),
            Intrinsic::Lower => Ok(format!("LOWER({})", self.render(arg(0)?)?)),
            Intrinsic::IsNull => {
                let operand = self.render(arg(0)?)?;
                let fallback = self.render(arg(1)?)?;
                Ok(format!("{}({}, {})", self.translator.null_function(), operand, fallback))
            }
            Intrinsic::Cast => {
                let Expr::Constant(Value::String(ty)) = arg(1)? else {
                    return Err(WeaveError::unsupported("Sql.Cast needs a constant target type"));
                };
                let ty = LogicalType::from_str(ty)?;
                let size = match args.get(2) {
                    Some(Expr::Constant(Value::Int(n))) => u32::try_from(*n).map_err(|_| {
                        WeaveError::unsupported(format!("Sql.Cast size {} is out of range", n))
                    })?,
                    _ => 0,
                };
                let operand = self.render(arg(0)?)?;
                Ok(format!(
                    "CAST({} AS {})",
                    operand,
                    self.translator.type_name(ty, size, 0, true)
                ))
            }
        }
    }
}
