//! iv Value - the runtime value universe.
//!
//! Every operand the evaluator handles is a [`Value`]: booleans, numbers,
//! strings, the array family (generic arrays, string arrays, index
//! arrays, the empty array) and function values. The set is closed;
//! domain combinators and primitive bodies match on it exhaustively.
//!
//! This crate also defines the two seams primitive libraries see:
//! - [`NumericTower`]: the external numeric model, consulted for boolean
//!   and index conversions
//! - [`Executor`]: the callback surface a primitive or operator body uses
//!   to call other functions

pub mod errors;
mod value;

pub use errors::{
    conversion_error, guard_type_error, index_out_of_bounds, length_error, no_matching_domain,
    not_an_array, not_callable, recursion_limit_exceeded, shape_mismatch, undefined_variable,
    unknown_operator, unknown_primitive, unreachable_code, vfs_error, EvalError, EvalErrorKind,
    EvalNote, EvalResult,
};
pub use value::{
    shape_size, ArrayValue, DerivedFunction, Executor, FunctionValue, Heap, IndexArray,
    LambdaValue, Number, NumericTower, OperatorFn, PrimitiveFn, RenderContext, StandardTower,
    StringArray, Value,
};
