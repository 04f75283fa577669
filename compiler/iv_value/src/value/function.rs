//! Function values and the executor seam.

use super::{NumericTower, Value};
use crate::errors::EvalResult;
use iv_ir::{GuardRange, Name, SharedArena};
use std::fmt;
use std::sync::Arc;

/// What a primitive or operator body may ask of the interpreter.
///
/// Bodies receive a `&mut dyn Executor` bound to the caller's active
/// scope, so a closure passed as an operand runs in the right lexical
/// context.
pub trait Executor {
    fn tower(&self) -> &dyn NumericTower;

    /// Call a function value with an optional left and a right argument.
    fn call(&mut self, func: &FunctionValue, left: Option<Value>, right: Value) -> EvalResult;
}

/// Body of a primitive handler. Arguments arrive already converted by the
/// handler's domain.
pub type PrimitiveFn =
    Arc<dyn Fn(&mut dyn Executor, Option<Value>, Value) -> EvalResult + Send + Sync>;

/// Body of an operator definition, applied once the derived function is
/// called: `(executor, left operand, right operand, left, right)`.
pub type OperatorFn = Arc<
    dyn Fn(&mut dyn Executor, &Value, Option<&Value>, Option<Value>, Value) -> EvalResult
        + Send
        + Sync,
>;

/// User-defined closure: a guard list and the arena it lives in.
///
/// The closure runs against its own arena whichever interpreter calls it.
#[derive(Clone, Debug)]
pub struct LambdaValue {
    pub arena: SharedArena,
    pub body: GuardRange,
}

impl LambdaValue {
    pub fn new(arena: SharedArena, body: GuardRange) -> Self {
        LambdaValue { arena, body }
    }
}

/// Same body in the same arena.
impl PartialEq for LambdaValue {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body && SharedArena::ptr_eq(&self.arena, &other.arena)
    }
}

impl Eq for LambdaValue {}

/// Function produced by applying an operator to its operands.
#[derive(Clone)]
pub struct DerivedFunction {
    pub operator: Name,
    pub left_operand: Value,
    pub right_operand: Option<Value>,
    pub(crate) imp: OperatorFn,
}

impl DerivedFunction {
    pub fn new(
        operator: Name,
        left_operand: Value,
        right_operand: Option<Value>,
        imp: OperatorFn,
    ) -> Self {
        DerivedFunction {
            operator,
            left_operand,
            right_operand,
            imp,
        }
    }

    /// Run the operator body against the stored operands.
    pub fn apply(&self, cx: &mut dyn Executor, left: Option<Value>, right: Value) -> EvalResult {
        (self.imp)(cx, &self.left_operand, self.right_operand.as_ref(), left, right)
    }
}

impl PartialEq for DerivedFunction {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator
            && self.left_operand == other.left_operand
            && self.right_operand == other.right_operand
            && Arc::ptr_eq(&self.imp, &other.imp)
    }
}

impl fmt::Debug for DerivedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedFunction")
            .field("operator", &self.operator)
            .field("left_operand", &self.left_operand)
            .field("right_operand", &self.right_operand)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FunctionValue {
    /// Registered primitive, dispatched by symbol at call time.
    Primitive(Name),
    Lambda(LambdaValue),
    Derived(Box<DerivedFunction>),
}
