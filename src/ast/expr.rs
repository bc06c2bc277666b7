use std::sync::Arc;

use crate::ast::{BinaryOp, Intrinsic, UnaryOp, Value};
use crate::schema::TableDefinition;

/// Error returned by a host-side function.
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

/// A host-side function folded into a constant by the partial evaluator.
pub type HostFn = Arc<dyn Fn(&[Value]) -> Result<Value, HostError> + Send + Sync>;

/// A node of the predicate/projection tree.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Member access: an entity column or a field of a captured container
    Member { base: MemberBase, name: String },
    /// Resolved literal
    Constant(Value),
    /// Binary expression (lhs op rhs)
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Unary expression (op operand)
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// Method or function call, intrinsic or host-side
    Call { callee: Callee, args: Vec<Expr> },
    /// Anonymous multi-field projection
    Tuple(Vec<Expr>),
}

/// What a [`Expr::Member`] is read from.
#[derive(Debug, Clone)]
pub enum MemberBase {
    /// A column of the given entity
    Entity(EntityRef),
    /// A field of the value produced by the base expression
    Expr(Box<Expr>),
}

/// Target of a [`Expr::Call`].
#[derive(Clone)]
pub struct Callee {
    /// Declaring type of the method; [`Intrinsic::MARKER`] for SQL intrinsics
    pub declaring: String,
    pub name: String,
    host: Option<HostFn>,
}

impl Callee {
    /// An SQL intrinsic callee.
    pub fn intrinsic(intrinsic: Intrinsic) -> Self {
        Self {
            declaring: Intrinsic::MARKER.to_string(),
            name: intrinsic.name().to_string(),
            host: None,
        }
    }

    /// A host-side callee evaluated during partial evaluation.
    pub fn host(declaring: impl Into<String>, name: impl Into<String>, func: HostFn) -> Self {
        Self {
            declaring: declaring.into(),
            name: name.into(),
            host: Some(func),
        }
    }

    /// A callee with no implementation; only valid when it names an intrinsic.
    pub fn declared(declaring: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            declaring: declaring.into(),
            name: name.into(),
            host: None,
        }
    }

    pub fn intrinsic_tag(&self) -> Option<Intrinsic> {
        Intrinsic::resolve(&self.declaring, &self.name)
    }

    pub fn host_fn(&self) -> Option<&HostFn> {
        self.host.as_ref()
    }
}

impl std::fmt::Debug for Callee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callee")
            .field("declaring", &self.declaring)
            .field("name", &self.name)
            .field("host", &self.host.is_some())
            .finish()
    }
}

/// Handle to an entity's table, used to reference its columns.
#[derive(Debug, Clone)]
pub struct EntityRef {
    table: Arc<TableDefinition>,
}

impl EntityRef {
    pub fn new(table: Arc<TableDefinition>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TableDefinition {
        &self.table
    }

    /// Reference the column `name` of this entity.
    pub fn col(&self, name: impl Into<String>) -> Expr {
        Expr::Member {
            base: MemberBase::Entity(self.clone()),
            name: name.into(),
        }
    }
}

impl Expr {
    pub fn constant(value: impl Into<Value>) -> Self {
        Expr::Constant(value.into())
    }

    /// Literal SQL text, rendered inline.
    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Constant(Value::Sql(sql.into()))
    }

    /// Field `name` of a captured container (a closure-captured variable).
    pub fn captured(container: Value, name: impl Into<String>) -> Self {
        Expr::Member {
            base: MemberBase::Expr(Box::new(Expr::Constant(container))),
            name: name.into(),
        }
    }

    /// Member `name` read from the value of `self`.
    pub fn member(self, name: impl Into<String>) -> Self {
        Expr::Member {
            base: MemberBase::Expr(Box::new(self)),
            name: name.into(),
        }
    }

    /// A host-side function call, folded into a constant at compile time.
    pub fn host_call<F>(name: impl Into<String>, args: Vec<Expr>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, HostError> + Send + Sync + 'static,
    {
        Expr::Call {
            callee: Callee::host("host", name, Arc::new(func)),
            args,
        }
    }

    pub fn call(callee: Callee, args: Vec<Expr>) -> Self {
        Expr::Call { callee, args }
    }

    pub fn intrinsic(intrinsic: Intrinsic, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Callee::intrinsic(intrinsic),
            args,
        }
    }

    pub fn tuple(items: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Tuple(items.into_iter().collect())
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Expr::Constant(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Expr::Constant(_))
    }
}
