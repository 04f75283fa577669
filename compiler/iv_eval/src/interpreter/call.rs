//! Function calls, closures and guard lists.

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::environment::{LocalScope, Scope};
use iv_ir::{ExprId, ExprPrinter, GuardRange};
use iv_value::{
    guard_type_error, unreachable_code, EvalError, EvalNote, EvalResult, Executor,
    FunctionValue, LambdaValue, NumericTower, Value,
};
use tracing::{debug, trace};

/// Executor handed to primitive and operator bodies: the interpreter
/// bound to the scope active at the call.
pub(crate) struct CallSite<'i> {
    interp: &'i mut Interpreter,
    env: LocalScope<Scope>,
}

impl<'i> CallSite<'i> {
    pub(crate) fn new(interp: &'i mut Interpreter, env: &LocalScope<Scope>) -> Self {
        CallSite {
            interp,
            env: env.clone(),
        }
    }
}

impl Executor for CallSite<'_> {
    fn tower(&self) -> &dyn NumericTower {
        self.interp.tower.as_ref()
    }

    fn call(&mut self, func: &FunctionValue, left: Option<Value>, right: Value) -> EvalResult {
        self.interp.call_function(func, left, right, &self.env)
    }
}

impl Interpreter {
    /// Call a function value. `env` is the scope active at the call site.
    pub(crate) fn call_function(
        &mut self,
        func: &FunctionValue,
        left: Option<Value>,
        right: Value,
        env: &LocalScope<Scope>,
    ) -> EvalResult {
        match func {
            FunctionValue::Primitive(symbol) => {
                let dispatch =
                    self.registry
                        .resolve_primitive(self.tower.as_ref(), *symbol, left.as_ref(), &right)?;
                dispatch.call(&mut CallSite::new(self, env))
            }
            FunctionValue::Lambda(lambda) => self.call_lambda(lambda, left, right, env),
            FunctionValue::Derived(derived) => {
                derived.apply(&mut CallSite::new(self, env), left, right)
            }
        }
    }

    fn call_lambda(
        &mut self,
        lambda: &LambdaValue,
        left: Option<Value>,
        right: Value,
        env: &LocalScope<Scope>,
    ) -> EvalResult {
        self.call_stack.push(CallFrame { body: lambda.body })?;
        debug!(
            depth = self.call_stack.depth(),
            guards = lambda.body.len(),
            monadic = left.is_none(),
            "λ call"
        );
        // The body's ids index the closure's own arena.
        let caller_arena = std::mem::replace(&mut self.arena, lambda.arena.clone());
        let result = self.run_lambda(lambda.body, left, right, env);
        self.arena = caller_arena;
        self.call_stack.pop();
        result
    }

    fn run_lambda(
        &mut self,
        body: GuardRange,
        left: Option<Value>,
        right: Value,
        env: &LocalScope<Scope>,
    ) -> EvalResult {
        if body.is_empty() {
            return Ok(Value::EmptyArray);
        }
        let mut scope = Scope::with_parent(env.clone());
        match left {
            Some(left) => scope.define(self.names.alpha, left),
            None => scope.define_absent(self.names.alpha),
        }
        scope.define(self.names.omega, right);
        self.eval_guards(body, &LocalScope::new(scope))
    }

    /// Run a closure body.
    ///
    /// A guard whose condition is false is skipped. An assignment records
    /// its value and falls through to the next guard; any other statement
    /// returns. An unconditional non-assignment anywhere but last could
    /// never let later guards run and is rejected when reached.
    pub(crate) fn eval_guards(&mut self, body: GuardRange, scope: &LocalScope<Scope>) -> EvalResult {
        let arena = self.arena.clone();
        let guards = arena.get_guards(body);
        let last = guards.len().saturating_sub(1);
        let mut result = Value::EmptyArray;
        for (index, guard) in guards.iter().enumerate() {
            let is_assignment = arena.kind(guard.body).is_assignment();
            if guard.cond.is_none() && index < last && !is_assignment {
                return Err(unreachable_code(&self.print_expr(guard.body))
                    .with_span(arena.span(guard.body))
                    .with_note(self.guard_note(body, index)));
            }
            if let Some(cond) = guard.cond {
                if !self.eval_condition(cond, scope, body, index)? {
                    trace!(guard = index, "guard skipped");
                    continue;
                }
            }
            let value = self.eval_in(guard.body, scope)?;
            if !is_assignment {
                return Ok(value);
            }
            result = value;
        }
        Ok(result)
    }

    /// A condition must yield a boolean, or a number the tower converts to
    /// one.
    fn eval_condition(
        &mut self,
        cond: ExprId,
        scope: &LocalScope<Scope>,
        body: GuardRange,
        index: usize,
    ) -> Result<bool, EvalError> {
        let value = self.eval_in(cond, scope)?;
        let truth = match &value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => self.tower.to_bool(*n),
            _ => None,
        };
        truth.ok_or_else(|| {
            guard_type_error(&value)
                .with_span(self.arena.span(cond))
                .with_note(self.guard_note(body, index))
        })
    }

    /// Locates guard `index` (zero-based) within its closure.
    fn guard_note(&self, body: GuardRange, index: usize) -> EvalNote {
        let lambda = ExprPrinter::new(&self.arena, &self.interner).lambda(body);
        EvalNote::new(format!("guard {} of {lambda}", index + 1))
    }
}
