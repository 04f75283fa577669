//! iv Eval - tree-walking evaluator.
//!
//! Evaluates an [`iv_ir::ExprArena`] against a primitive [`iv_domain::Registry`]:
//! - [`Interpreter`]: right-to-left evaluation, closures with guard lists,
//!   operator derivation and selective assignment
//! - [`Scope`]: lexical scopes chained to the caller's scope
//! - [`CallStack`]: closure call depth with a recursion limit
//! - [`selection`] / [`select_simple`]: the index arrays behind `(L f X)←V`
//! - [`register_system_functions`]: `⎕READ` on top of an [`iv_vfs::MountTable`]

mod diagnostics;
mod environment;
mod interpreter;
mod select;
mod system;

pub use diagnostics::{CallFrame, CallStack, DEFAULT_MAX_DEPTH};
pub use environment::{LocalScope, Scope, Unbound};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use select::{assign_selected, select_simple, selection};
pub use system::{register_system_functions, READ};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `IV_LOG`, falling back to
/// `RUST_LOG`. Does nothing when neither is set or a subscriber exists.
///
/// Enable with `IV_LOG=iv_eval=debug` or `IV_LOG=iv_domain=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{fmt, EnvFilter};

        let Ok(filter) =
            EnvFilter::try_from_env("IV_LOG").or_else(|_| EnvFilter::try_from_default_env())
        else {
            return;
        };
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests;
