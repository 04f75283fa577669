//! Lexical scopes for closure evaluation.
//!
//! A closure call creates a fresh [`Scope`] whose parent is the scope that
//! was active at the call site. Scopes are passed explicitly through
//! evaluation; the interpreter keeps no "current scope" of its own.

use iv_ir::Name;
use iv_value::Value;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Single-threaded shared handle to a scope.
///
/// Child scopes hold their parent through this handle, so a scope lives as
/// long as any closure call below it.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Error returned by [`Scope::assign`] when no scope in the chain binds
/// the name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unbound;

#[derive(Clone, Debug)]
enum Binding {
    Bound(Value),
    /// Declared but without a value, like `⍺` in a monadic call. Lookup
    /// stops here instead of continuing to the parent.
    Absent,
}

/// Variable bindings plus a link to the enclosing scope.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Binding>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this scope, replacing any binding it already has
    /// here.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, Binding::Bound(value));
    }

    /// Declare `name` in this scope without a value.
    #[inline]
    pub fn define_absent(&mut self, name: Name) {
        self.bindings.insert(name, Binding::Absent);
    }

    /// Value of `name`, searching outward through the parent chain.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        match self.bindings.get(&name) {
            Some(Binding::Bound(value)) => Some(value.clone()),
            Some(Binding::Absent) => None,
            None => self.parent.as_ref()?.borrow().lookup(name),
        }
    }

    /// Whether `name` is declared in this scope itself.
    pub fn declares(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    /// Rebind the nearest scope that declares `name`.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), Unbound> {
        if let Some(binding) = self.bindings.get_mut(&name) {
            *binding = Binding::Bound(value);
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(Unbound),
        }
    }

    pub fn parent(&self) -> Option<&LocalScope<Scope>> {
        self.parent.as_ref()
    }
}
