//! Expression nodes.
//!
//! APL evaluates right to left and every function takes an optional left
//! argument and a right argument, so calls are a single node kind with an
//! optional left side. Functions are ordinary expressions: a primitive
//! symbol, a closure literal, an operator-derived function, or any
//! expression that evaluates to a function value.

use crate::{ExprId, ExprRange, GuardRange, Name, Span};

/// Expression node with its source location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal.
    Int(i64),
    /// Float literal, stored as bits.
    Float(u64),
    /// Boolean literal.
    Bool(bool),
    /// String literal (`'text'`).
    Str(Name),
    /// Strand of literals or parenthesized expressions (`1 2 3`).
    Vector(ExprRange),
    /// Variable reference, including `⍺`, `⍵` and system names.
    Ident(Name),
    /// Reference to a registered primitive function (`+`, `⍴`, ...).
    Primitive(Name),
    /// Closure literal (`{...}`), a list of guarded expressions.
    Lambda(GuardRange),
    /// Operator applied to its operands (`+/`, `f∘g`).
    ///
    /// `right_operand` is `None` for monadic operators.
    Derived {
        operator: Name,
        left_operand: ExprId,
        right_operand: Option<ExprId>,
    },
    /// Function application. `left` is `None` for monadic calls.
    Call {
        func: ExprId,
        left: Option<ExprId>,
        right: ExprId,
    },
    /// `name←value`
    Assign { target: Name, value: ExprId },
    /// `(left func name)←value`: replace the positions of `name` that
    /// `func` selects.
    SelectiveAssign {
        target: Name,
        func: ExprId,
        left: Option<ExprId>,
        value: ExprId,
    },
}

impl ExprKind {
    /// Whether this node is an assignment statement.
    ///
    /// Assignments inside a closure body fall through to the next guard
    /// instead of returning.
    #[inline]
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            ExprKind::Assign { .. } | ExprKind::SelectiveAssign { .. }
        )
    }

    pub fn float(value: f64) -> Self {
        ExprKind::Float(value.to_bits())
    }
}

/// One statement of a closure body: `cond:body`, or just `body`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GuardExpr {
    pub cond: Option<ExprId>,
    pub body: ExprId,
}

impl GuardExpr {
    pub fn new(cond: Option<ExprId>, body: ExprId) -> Self {
        GuardExpr { cond, body }
    }

    pub fn unconditional(body: ExprId) -> Self {
        GuardExpr { cond: None, body }
    }
}
