//! Handler registry and dispatch resolver.
//!
//! Each primitive symbol maps to an append-only list of handlers, each
//! operator symbol to an append-only list of definitions. Registration
//! order is try order: the first entry whose domain accepts wins, and an
//! error raised by the chosen body is returned as is rather than retried
//! against later entries.

use crate::Domain;
use iv_ir::{Name, SharedInterner};
use iv_value::{
    no_matching_domain, unknown_operator, unknown_primitive, DerivedFunction, EvalError,
    EvalResult, Executor, FunctionValue, NumericTower, OperatorFn, PrimitiveFn, Value,
};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

struct PrimitiveHandler {
    domain: Domain,
    imp: PrimitiveFn,
}

/// Number of operands an operator takes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperatorArity {
    /// One operand, on the left (`+/`). Its domain sees `(None, LO)`.
    Monadic,
    /// Two operands (`f∘g`). Its domain sees `(LO, RO)`.
    Dyadic,
}

struct OperatorDef {
    arity: OperatorArity,
    domain: Domain,
    imp: OperatorFn,
}

/// Resolved primitive call: the chosen body and the converted arguments.
///
/// Returned by value so the caller runs the body after its borrow of the
/// registry has ended.
pub struct Dispatch {
    imp: PrimitiveFn,
    pub left: Option<Value>,
    pub right: Value,
}

impl Dispatch {
    pub fn call(self, cx: &mut dyn Executor) -> EvalResult {
        (self.imp)(cx, self.left, self.right)
    }
}

/// Registry of primitive handlers and operator definitions.
pub struct Registry {
    interner: SharedInterner,
    primitives: FxHashMap<Name, Vec<PrimitiveHandler>>,
    operators: FxHashMap<Name, Vec<OperatorDef>>,
}

impl Registry {
    pub fn new(interner: SharedInterner) -> Self {
        Registry {
            interner,
            primitives: FxHashMap::default(),
            operators: FxHashMap::default(),
        }
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Append a handler to `symbol`'s list.
    pub fn register_primitive<F>(&mut self, symbol: &str, domain: Domain, imp: F) -> Name
    where
        F: Fn(&mut dyn Executor, Option<Value>, Value) -> EvalResult + Send + Sync + 'static,
    {
        let name = self.interner.intern(symbol);
        self.primitives
            .entry(name)
            .or_default()
            .push(PrimitiveHandler {
                domain,
                imp: Arc::new(imp),
            });
        name
    }

    /// Append an operator definition to `symbol`'s list.
    ///
    /// `imp` runs when the derived function is called and receives the
    /// operands as converted by `domain`.
    pub fn register_operator<F>(
        &mut self,
        symbol: &str,
        arity: OperatorArity,
        domain: Domain,
        imp: F,
    ) -> Name
    where
        F: Fn(&mut dyn Executor, &Value, Option<&Value>, Option<Value>, Value) -> EvalResult
            + Send
            + Sync
            + 'static,
    {
        let name = self.interner.intern(symbol);
        self.operators.entry(name).or_default().push(OperatorDef {
            arity,
            domain,
            imp: Arc::new(imp),
        });
        name
    }

    pub fn is_primitive(&self, symbol: Name) -> bool {
        self.primitives.contains_key(&symbol)
    }

    pub fn is_operator(&self, symbol: Name) -> bool {
        self.operators.contains_key(&symbol)
    }

    /// Pick the first handler of `symbol` whose domain accepts the
    /// arguments.
    pub fn resolve_primitive(
        &self,
        tower: &dyn NumericTower,
        symbol: Name,
        left: Option<&Value>,
        right: &Value,
    ) -> Result<Dispatch, EvalError> {
        let text = self.interner.lookup(symbol);
        let Some(handlers) = self.primitives.get(&symbol) else {
            return Err(unknown_primitive(text));
        };
        for (index, handler) in handlers.iter().enumerate() {
            if let Some((left, right)) = handler.domain.to(tower, left, right) {
                trace!(symbol = text, index, domain = %handler.domain, "handler selected");
                return Ok(Dispatch {
                    imp: Arc::clone(&handler.imp),
                    left,
                    right,
                });
            }
            trace!(symbol = text, index, domain = %handler.domain, "domain rejected");
        }
        let tried = handlers.iter().map(|h| h.domain.to_string()).collect();
        Err(no_matching_domain(text, left, right, tried))
    }

    /// Apply operator `symbol` to its operands, producing a derived
    /// function.
    ///
    /// Definitions whose arity does not match the operand count are
    /// skipped like rejecting domains.
    pub fn derive(
        &self,
        tower: &dyn NumericTower,
        symbol: Name,
        left_operand: &Value,
        right_operand: Option<&Value>,
    ) -> Result<FunctionValue, EvalError> {
        let text = self.interner.lookup(symbol);
        let Some(defs) = self.operators.get(&symbol) else {
            return Err(unknown_operator(text));
        };
        for def in defs {
            let accepted = match (def.arity, right_operand) {
                (OperatorArity::Monadic, None) => def
                    .domain
                    .to(tower, None, left_operand)
                    .map(|(_, lo)| (lo, None)),
                (OperatorArity::Dyadic, Some(ro)) => def
                    .domain
                    .to(tower, Some(left_operand), ro)
                    .and_then(|(lo, ro)| lo.map(|lo| (lo, Some(ro)))),
                _ => None,
            };
            if let Some((lo, ro)) = accepted {
                debug!(operator = text, domain = %def.domain, "derived function");
                let derived = DerivedFunction::new(symbol, lo, ro, Arc::clone(&def.imp));
                return Ok(FunctionValue::Derived(Box::new(derived)));
            }
        }
        let tried = defs.iter().map(|d| d.domain.to_string()).collect();
        Err(match right_operand {
            None => no_matching_domain(text, None, left_operand, tried),
            Some(ro) => no_matching_domain(text, Some(left_operand), ro, tried),
        })
    }

    /// Registered domains of `symbol` in try order, primitive handlers
    /// first.
    pub fn describe(&self, symbol: &str) -> Vec<String> {
        let Some(name) = self.interner.get(symbol) else {
            return Vec::new();
        };
        let primitives = self
            .primitives
            .get(&name)
            .into_iter()
            .flatten()
            .map(|h| h.domain.to_string());
        let operators = self
            .operators
            .get(&name)
            .into_iter()
            .flatten()
            .map(|d| d.domain.to_string());
        primitives.chain(operators).collect()
    }

    /// Registered primitive and operator symbols, sorted.
    pub fn symbols(&self) -> Vec<&'static str> {
        let mut symbols: Vec<&'static str> = self
            .primitives
            .keys()
            .chain(self.operators.keys())
            .map(|&name| self.interner.lookup(name))
            .collect();
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("primitives", &self.primitives.len())
            .field("operators", &self.operators.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
