//! iv IR - expression trees consumed by the evaluator.
//!
//! The parser (not part of this workspace) lowers source text into the
//! flat representation defined here:
//! - `Name`: interned identifiers and primitive symbols
//! - `Span`: byte ranges for diagnostics
//! - `ExprArena`: contiguous storage for expressions, expression lists and
//!   closure bodies, addressed by `ExprId`, `ExprRange` and `GuardRange`
//! - `SharedArena`: a frozen arena shared by interpreters and closures
//! - `ExprKind`: the node kinds the evaluator understands
//!
//! Floats are stored as `u64` bits so every node is `Copy + Eq + Hash`.

mod arena;
mod ast;
mod expr_id;
mod interner;
mod name;
mod printer;
mod span;

pub use arena::{ExprArena, SharedArena};
pub use ast::{Expr, ExprKind, GuardExpr};
pub use expr_id::{ExprId, ExprRange, GuardRange};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use printer::ExprPrinter;
pub use span::Span;
