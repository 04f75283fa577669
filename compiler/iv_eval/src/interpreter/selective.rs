//! Selective assignment: `(L f X)←V`.

use super::{CallSite, Interpreter};
use crate::environment::{LocalScope, Scope};
use crate::select::{assign_selected, select_simple, selection};
use iv_ir::{ExprId, ExprKind, Name};
use iv_value::{undefined_variable, EvalResult, Executor};
use std::sync::Arc;
use tracing::trace;

impl Interpreter {
    pub(crate) fn eval_selective_assign(
        &mut self,
        target: Name,
        func: ExprId,
        left: Option<ExprId>,
        value: ExprId,
        env: &LocalScope<Scope>,
    ) -> EvalResult {
        let value = self.eval_in(value, env)?;
        let left = left.map(|l| self.eval_in(l, env)).transpose()?;
        let current = self.lookup(target, env)?;

        let indexes = match self.arena.kind(func) {
            ExprKind::Derived {
                operator,
                left_operand,
                right_operand,
            } => {
                let right_operand = right_operand
                    .map(|ro| self.eval_in(ro, env))
                    .transpose()?;
                let left_operand = self.eval_in(left_operand, env)?;
                let registry = self.registry.clone();
                let tower = Arc::clone(&self.tower);
                selection(
                    &mut CallSite::new(self, env),
                    |lo, ro| registry.derive(tower.as_ref(), operator, lo, ro),
                    &left_operand,
                    right_operand.as_ref(),
                    left,
                    &current,
                )?
            }
            _ => {
                let select = self.eval_function(func, env)?;
                select_simple(
                    &mut CallSite::new(self, env),
                    |cx: &mut dyn Executor, left, indexes| cx.call(&select, left, indexes),
                    left,
                    &current,
                )?
            }
        };
        trace!(selected = indexes.size(), "selective assignment");

        let updated = assign_selected(&current, &indexes, &value)?;
        env.borrow_mut()
            .assign(target, updated)
            .map_err(|_| undefined_variable(self.interner.lookup(target)))?;
        Ok(value)
    }
}
