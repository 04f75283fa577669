//! Stack growth for recursive evaluation.
//!
//! Closures may call themselves by name, and every call walks a fresh
//! guard list through the tree-walking evaluator. Each level of user
//! recursion therefore costs several native frames. Wrapping the
//! recursive entry points in [`ensure_sufficient_stack`] keeps the native
//! stack from running out before the interpreter's own call-depth limit
//! reports the runaway recursion as an error.
//!
//! - **Red zone**: 128KB. Below this much remaining stack, a new segment is allocated.
//! - **Segment size**: 2MB per growth.
//!
//! On `wasm32` the closure is called directly.

const RED_ZONE: usize = 128 * 1024;

const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the native stack if less than the red zone remains.
///
/// ```text
/// fn eval(&mut self, id: ExprId, env: &LocalScope<Scope>) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_inner(id, env))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
