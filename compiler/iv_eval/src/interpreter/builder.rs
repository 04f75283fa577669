//! `InterpreterBuilder` for configuring interpreters.

use super::{Interpreter, SystemNames};
use crate::diagnostics::{CallStack, DEFAULT_MAX_DEPTH};
use crate::environment::{LocalScope, Scope};
use iv_domain::{Registry, SharedRegistry};
use iv_ir::SharedArena;
use iv_value::{NumericTower, StandardTower, Value};
use std::sync::Arc;

/// Builder for [`Interpreter`].
///
/// The interner comes from the registry, so primitive symbols registered
/// there and names in the arena agree.
pub struct InterpreterBuilder {
    arena: SharedArena,
    registry: SharedRegistry<Registry>,
    tower: Option<Arc<dyn NumericTower>>,
    root: Option<LocalScope<Scope>>,
    max_depth: usize,
}

impl InterpreterBuilder {
    pub fn new(arena: impl Into<SharedArena>, registry: SharedRegistry<Registry>) -> Self {
        InterpreterBuilder {
            arena: arena.into(),
            registry,
            tower: None,
            root: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Numeric tower consulted for guard conditions and index conversion.
    /// Defaults to [`StandardTower`].
    #[must_use]
    pub fn tower(mut self, tower: Arc<dyn NumericTower>) -> Self {
        self.tower = Some(tower);
        self
    }

    /// Share an existing root scope, e.g. between interpreters over
    /// different arenas. It is used as is. Closures bound in it keep
    /// their own arena.
    #[must_use]
    pub fn root_scope(mut self, root: LocalScope<Scope>) -> Self {
        self.root = Some(root);
        self
    }

    /// Maximum number of nested closure calls.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Interpreter {
        let interner = self.registry.interner().clone();
        let names = SystemNames::new(&interner);
        let root = self.root.unwrap_or_else(|| {
            let mut scope = Scope::new();
            scope.define(names.newline, Value::string("\n"));
            scope.define(names.index_origin, Value::int(1));
            LocalScope::new(scope)
        });
        Interpreter {
            arena: self.arena,
            interner,
            registry: self.registry,
            tower: self.tower.unwrap_or_else(|| Arc::new(StandardTower)),
            call_stack: CallStack::new(self.max_depth),
            names,
            root,
        }
    }
}
