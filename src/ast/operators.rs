use serde::{Deserialize, Serialize};

/// Binary operators of the predicate AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Equal (=)
    Eq,
    /// Not equal (<>)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
    /// Logical AND
    And,
    /// Logical OR
    Or,
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
    /// Modulo (%)
    Rem,
    /// String concatenation, rendered per dialect
    Concat,
}

impl BinaryOp {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Gt | BinaryOp::Ge | BinaryOp::Lt | BinaryOp::Le
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    /// The logical inverse of a comparison (`=` ↔ `<>`, `>` ↔ `<=`, ...).
    pub fn inverse(&self) -> Option<BinaryOp> {
        Some(match self {
            BinaryOp::Eq => BinaryOp::Ne,
            BinaryOp::Ne => BinaryOp::Eq,
            BinaryOp::Gt => BinaryOp::Le,
            BinaryOp::Le => BinaryOp::Gt,
            BinaryOp::Lt => BinaryOp::Ge,
            BinaryOp::Ge => BinaryOp::Lt,
            _ => return None,
        })
    }

    /// SQL symbol used by the default operator formats.
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Concat => "||",
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql_symbol())
    }
}

/// Unary operators of the predicate AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Logical negation
    Not,
    /// Arithmetic negation
    Neg,
}

/// Sort order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Join kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

impl JoinKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        }
    }
}

/// SQL-intrinsic operations recognized by the partial evaluator.
///
/// A call matches only when it is declared on the [`Intrinsic::MARKER`] type;
/// calls with the same name on any other declaring type are host calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intrinsic {
    Min,
    Max,
    Sum,
    Average,
    Count,
    As,
    Between,
    In,
    Like,
    TrimSql,
    Length,
    Upper,
    Lower,
    IsNull,
    Cast,
}

impl Intrinsic {
    /// Declaring marker type of every intrinsic call.
    pub const MARKER: &'static str = "Sql";

    const TABLE: [(&'static str, Intrinsic); 15] = [
        ("Min", Intrinsic::Min),
        ("Max", Intrinsic::Max),
        ("Sum", Intrinsic::Sum),
        ("Average", Intrinsic::Average),
        ("Count", Intrinsic::Count),
        ("As", Intrinsic::As),
        ("Between", Intrinsic::Between),
        ("In", Intrinsic::In),
        ("Like", Intrinsic::Like),
        ("TrimSql", Intrinsic::TrimSql),
        ("Length", Intrinsic::Length),
        ("Upper", Intrinsic::Upper),
        ("Lower", Intrinsic::Lower),
        ("IsNull", Intrinsic::IsNull),
        ("Cast", Intrinsic::Cast),
    ];

    /// Look up `(declaring, name)` in the dispatch table.
    pub fn resolve(declaring: &str, name: &str) -> Option<Intrinsic> {
        if declaring != Self::MARKER {
            return None;
        }
        Self::TABLE.iter().find(|(n, _)| *n == name).map(|(_, i)| *i)
    }

    pub fn name(&self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, i)| i == self)
            .map(|(n, _)| *n)
            .unwrap_or("?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_is_involution() {
        for op in [BinaryOp::Eq, BinaryOp::Ne, BinaryOp::Gt, BinaryOp::Ge, BinaryOp::Lt, BinaryOp::Le] {
            assert_eq!(op.inverse().and_then(|i| i.inverse()), Some(op));
        }
        assert_eq!(BinaryOp::And.inverse(), None);
    }

    #[test]
    fn test_intrinsic_requires_marker() {
        assert_eq!(Intrinsic::resolve("Sql", "Between"), Some(Intrinsic::Between));
        assert_eq!(Intrinsic::resolve("String", "Length"), None);
        assert_eq!(Intrinsic::resolve("Sql", "Reverse"), None);
        assert_eq!(Intrinsic::IsNull.name(), "IsNull");
    }
}
