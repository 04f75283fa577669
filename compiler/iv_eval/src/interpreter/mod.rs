//! Tree-walking interpreter.
//!
//! APL evaluates right to left: in `L f R` the right argument is
//! evaluated first, then the function, then the left argument. Strands
//! follow the same order.
//!
//! Every evaluation receives the active scope as an argument. Closure calls
//! build a child of the caller's scope and evaluate the body against it, so
//! nothing needs restoring when a call returns or fails.

mod builder;
mod call;
mod selective;

pub use builder::InterpreterBuilder;
pub(crate) use call::CallSite;

use crate::diagnostics::CallStack;
use crate::environment::{LocalScope, Scope};
use iv_domain::{Registry, SharedRegistry};
use iv_ir::{ExprId, ExprKind, ExprPrinter, ExprRange, Name, SharedArena, SharedInterner};
use iv_stack::ensure_sufficient_stack;
use iv_value::{
    not_callable, undefined_variable, EvalError, EvalResult, Executor, FunctionValue,
    LambdaValue, NumericTower, RenderContext, Value,
};
use std::sync::Arc;

/// Names the evaluator binds itself, interned once per interpreter.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SystemNames {
    pub(crate) alpha: Name,
    pub(crate) omega: Name,
    pub(crate) newline: Name,
    pub(crate) index_origin: Name,
}

impl SystemNames {
    pub(crate) fn new(interner: &SharedInterner) -> Self {
        SystemNames {
            alpha: interner.intern("⍺"),
            omega: interner.intern("⍵"),
            newline: interner.intern("⎕NL"),
            index_origin: interner.intern("⎕IO"),
        }
    }
}

pub struct Interpreter {
    /// Arena of the expressions being evaluated. A closure call switches
    /// to the closure's own arena for the duration of the call.
    pub(crate) arena: SharedArena,
    /// Same interner the registry and the arena use.
    pub(crate) interner: SharedInterner,
    pub(crate) registry: SharedRegistry<Registry>,
    pub(crate) tower: Arc<dyn NumericTower>,
    pub(crate) call_stack: CallStack,
    pub(crate) names: SystemNames,
    root: LocalScope<Scope>,
}

impl Interpreter {
    /// Interpreter with the standard numeric tower and default limits.
    pub fn new(arena: impl Into<SharedArena>, registry: SharedRegistry<Registry>) -> Self {
        InterpreterBuilder::new(arena, registry).build()
    }

    pub fn builder(
        arena: impl Into<SharedArena>,
        registry: SharedRegistry<Registry>,
    ) -> InterpreterBuilder {
        InterpreterBuilder::new(arena, registry)
    }

    pub fn arena(&self) -> &SharedArena {
        &self.arena
    }

    /// Process-lifetime scope holding `⎕NL`, `⎕IO` and top-level
    /// assignments.
    pub fn root_scope(&self) -> &LocalScope<Scope> {
        &self.root
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn registry(&self) -> &SharedRegistry<Registry> {
        &self.registry
    }

    /// Number of closure calls currently active.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Evaluate `id` in the root scope.
    pub fn eval(&mut self, id: ExprId) -> EvalResult {
        let root = self.root.clone();
        self.eval_in(id, &root)
    }

    /// Evaluate `id` in `env`.
    pub fn eval_in(&mut self, id: ExprId, env: &LocalScope<Scope>) -> EvalResult {
        let span = self.arena.span(id);
        ensure_sufficient_stack(|| self.eval_inner(id, env)).map_err(|err| err.with_span(span))
    }

    fn eval_inner(&mut self, id: ExprId, env: &LocalScope<Scope>) -> EvalResult {
        match self.arena.kind(id) {
            ExprKind::Int(n) => Ok(Value::int(n)),
            ExprKind::Float(bits) => Ok(Value::float(f64::from_bits(bits))),
            ExprKind::Bool(b) => Ok(Value::Bool(b)),
            ExprKind::Str(text) => Ok(Value::string(self.interner.lookup(text))),
            ExprKind::Vector(items) => self.eval_vector(items, env),
            ExprKind::Ident(name) => self.lookup(name, env),
            ExprKind::Primitive(symbol) => Ok(Value::primitive(symbol)),
            ExprKind::Lambda(body) => Ok(Value::lambda(LambdaValue::new(self.arena.clone(), body))),
            ExprKind::Derived {
                operator,
                left_operand,
                right_operand,
            } => {
                let right_operand = right_operand
                    .map(|ro| self.eval_in(ro, env))
                    .transpose()?;
                let left_operand = self.eval_in(left_operand, env)?;
                let derived = self.registry.derive(
                    self.tower.as_ref(),
                    operator,
                    &left_operand,
                    right_operand.as_ref(),
                )?;
                Ok(Value::Function(derived))
            }
            ExprKind::Call { func, left, right } => {
                let right = self.eval_in(right, env)?;
                let func = self.eval_function(func, env)?;
                let left = left.map(|l| self.eval_in(l, env)).transpose()?;
                self.call_function(&func, left, right, env)
            }
            ExprKind::Assign { target, value } => {
                let value = self.eval_in(value, env)?;
                env.borrow_mut().define(target, value.clone());
                Ok(value)
            }
            ExprKind::SelectiveAssign {
                target,
                func,
                left,
                value,
            } => self.eval_selective_assign(target, func, left, value, env),
        }
    }

    /// Strand of expressions, evaluated right to left.
    fn eval_vector(&mut self, items: ExprRange, env: &LocalScope<Scope>) -> EvalResult {
        let arena = self.arena.clone();
        let ids = arena.get_expr_list(items);
        if ids.is_empty() {
            return Ok(Value::EmptyArray);
        }
        let mut elems = Vec::with_capacity(ids.len());
        for &id in ids.iter().rev() {
            elems.push(self.eval_in(id, env)?);
        }
        elems.reverse();
        Ok(Value::vector(elems))
    }

    pub(crate) fn lookup(&self, name: Name, env: &LocalScope<Scope>) -> EvalResult {
        env.borrow()
            .lookup(name)
            .ok_or_else(|| undefined_variable(self.interner.lookup(name)))
    }

    pub(crate) fn eval_function(
        &mut self,
        id: ExprId,
        env: &LocalScope<Scope>,
    ) -> Result<FunctionValue, EvalError> {
        match self.eval_in(id, env)? {
            Value::Function(func) => Ok(func),
            other => Err(not_callable(&other)),
        }
    }

    /// Source form of an expression, for diagnostics.
    pub(crate) fn print_expr(&self, id: ExprId) -> String {
        ExprPrinter::new(&self.arena, &self.interner).expr(id)
    }

    /// Text form of `value`.
    pub fn render(&self, value: &Value) -> String {
        value.render(self)
    }
}

impl RenderContext for Interpreter {
    fn name(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }

    fn lambda(&self, lambda: &LambdaValue) -> String {
        ExprPrinter::new(&lambda.arena, &self.interner).lambda(lambda.body)
    }
}

/// Calls made through the interpreter itself run in the root scope.
impl Executor for Interpreter {
    fn tower(&self) -> &dyn NumericTower {
        self.tower.as_ref()
    }

    fn call(&mut self, func: &FunctionValue, left: Option<Value>, right: Value) -> EvalResult {
        let root = self.root.clone();
        self.call_function(func, left, right, &root)
    }
}
