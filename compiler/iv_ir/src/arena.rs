//! Flat storage for expression trees.

use crate::{Expr, ExprId, ExprKind, ExprRange, GuardExpr, GuardRange, Span};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Contiguous storage for the expressions of one parsed input.
///
/// Child references are `ExprId` indices; strands and closure bodies are
/// ranges into side tables. Closure values keep only their `GuardRange`,
/// so an arena must outlive every interpreter that evaluates it.
#[derive(Clone, Default, Debug)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    guards: Vec<GuardExpr>,
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or_else(|_| panic!("expression arena exceeded u32::MAX entries"))
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, returning its id.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len()));
        self.exprs.push(expr);
        id
    }

    /// Allocate an expression without a meaningful source location.
    #[inline]
    pub fn alloc(&mut self, kind: ExprKind) -> ExprId {
        self.alloc_expr(Expr::new(kind, Span::DUMMY))
    }

    /// # Panics
    /// Panics if `id` does not belong to this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    #[track_caller]
    pub fn kind(&self, id: ExprId) -> ExprKind {
        self.exprs[id.index()].kind
    }

    #[inline]
    #[track_caller]
    pub fn span(&self, id: ExprId) -> Span {
        self.exprs[id.index()].span
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len();
        self.expr_lists.extend(exprs);
        ExprRange::new(to_u32(start), to_u32(self.expr_lists.len() - start))
    }

    #[track_caller]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    /// Allocate a closure body.
    pub fn alloc_guards(&mut self, guards: impl IntoIterator<Item = GuardExpr>) -> GuardRange {
        let start = self.guards.len();
        self.guards.extend(guards);
        GuardRange::new(to_u32(start), to_u32(self.guards.len() - start))
    }

    #[track_caller]
    pub fn get_guards(&self, range: GuardRange) -> &[GuardExpr] {
        let start = range.start as usize;
        &self.guards[start..start + range.len()]
    }
}

/// Frozen arena shared by interpreters and the closures they create.
///
/// A closure value keeps a handle to the arena its body lives in, so it can
/// be called from an interpreter evaluating a different arena.
#[derive(Clone)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Arc::new(arena))
    }

    /// Whether both handles refer to the same arena.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl From<ExprArena> for SharedArena {
    fn from(arena: ExprArena) -> Self {
        Self::new(arena)
    }
}

impl Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for SharedArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedArena")
            .field("exprs", &self.0.expr_count())
            .finish_non_exhaustive()
    }
}
