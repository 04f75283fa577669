//! Runtime values.
//!
//! Heap payloads go through [`Heap`], so `Value::clone` is cheap and no
//! value is ever mutated after construction. Transformations (domain
//! conversions, primitive results, selective assignment) build new values.

mod array;
mod function;
mod heap;
mod number;

pub use array::{shape_size, ArrayValue, IndexArray, StringArray};
pub use function::{
    DerivedFunction, Executor, FunctionValue, LambdaValue, OperatorFn, PrimitiveFn,
};
pub use heap::Heap;
pub use number::{Number, NumericTower, StandardTower};

use iv_ir::Name;

/// Context needed to render values that refer back to interpreter state.
///
/// Primitives and operators only know their interned symbol; closures are
/// printed from their own arena with the context's interner.
pub trait RenderContext {
    fn name(&self, name: Name) -> &str;

    /// Source form of a closure, braces included.
    fn lambda(&self, lambda: &LambdaValue) -> String;
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(Number),
    Str(Heap<String>),
    Array(ArrayValue),
    StringArray(StringArray),
    IndexArray(IndexArray),
    /// Result of an empty closure body and of guard lists that produce nothing.
    EmptyArray,
    Function(FunctionValue),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Number(Number::Int(n))
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn primitive(symbol: Name) -> Self {
        Value::Function(FunctionValue::Primitive(symbol))
    }

    #[inline]
    pub fn lambda(lambda: LambdaValue) -> Self {
        Value::Function(FunctionValue::Lambda(lambda))
    }

    #[inline]
    pub fn derived(derived: DerivedFunction) -> Self {
        Value::Function(FunctionValue::Derived(Box::new(derived)))
    }

    /// Rank-1 generic array.
    pub fn vector(elems: Vec<Value>) -> Self {
        Value::Array(ArrayValue::vector(elems))
    }

    pub fn index_vector(ints: Vec<i64>) -> Self {
        Value::IndexArray(IndexArray::vector(ints))
    }

    pub fn string_vector(strings: Vec<String>) -> Self {
        Value::StringArray(StringArray::vector(strings))
    }
}

// Value Methods

impl Value {
    /// Kind name for diagnostics and domain error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Number(Number::Int(_)) => "int",
            Value::Number(Number::Float(_)) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::StringArray(_) => "string array",
            Value::IndexArray(_) => "index array",
            Value::EmptyArray => "empty array",
            Value::Function(FunctionValue::Primitive(_)) => "primitive",
            Value::Function(FunctionValue::Lambda(_)) => "lambda",
            Value::Function(FunctionValue::Derived(_)) => "derived function",
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self,
            Value::Array(_) | Value::StringArray(_) | Value::IndexArray(_) | Value::EmptyArray
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Shape of an array value; `None` for scalars and functions.
    pub fn shape(&self) -> Option<&[usize]> {
        match self {
            Value::Array(a) => Some(a.shape()),
            Value::StringArray(a) => Some(a.shape()),
            Value::IndexArray(a) => Some(a.shape()),
            Value::EmptyArray => Some(&[0]),
            _ => None,
        }
    }

    /// Flat element list of an array value, each element as a `Value`.
    pub fn elements(&self) -> Option<Vec<Value>> {
        match self {
            Value::Array(a) => Some(a.elems().to_vec()),
            Value::StringArray(a) => Some(a.strings().iter().map(Value::string).collect()),
            Value::IndexArray(a) => Some(a.ints().iter().map(|&i| Value::int(i)).collect()),
            Value::EmptyArray => Some(Vec::new()),
            _ => None,
        }
    }

    /// Textual form of the value.
    pub fn render(&self, cx: &dyn RenderContext) -> String {
        match self {
            Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
            Value::Number(n) => n.render(),
            Value::Str(s) => s.to_string(),
            Value::EmptyArray => String::new(),
            Value::Array(a) => {
                let cells: Vec<String> = a
                    .elems()
                    .iter()
                    .map(|v| {
                        if v.is_array() {
                            format!("({})", v.render(cx))
                        } else {
                            v.render(cx)
                        }
                    })
                    .collect();
                render_cells(a.shape(), &cells)
            }
            Value::StringArray(a) => render_cells(a.shape(), a.strings()),
            Value::IndexArray(a) => {
                let cells: Vec<String> = a.ints().iter().map(|&i| Number::Int(i).render()).collect();
                render_cells(a.shape(), &cells)
            }
            Value::Function(FunctionValue::Primitive(name)) => cx.name(*name).to_string(),
            Value::Function(FunctionValue::Lambda(lambda)) => cx.lambda(lambda),
            Value::Function(FunctionValue::Derived(d)) => {
                let mut out = d.left_operand.render(cx);
                out.push_str(cx.name(d.operator));
                if let Some(right) = &d.right_operand {
                    out.push_str(&right.render(cx));
                }
                out
            }
        }
    }
}

/// Lay out rendered cells by shape: vectors on one line, matrices one row
/// per line, higher ranks as blank-line separated planes.
fn render_cells<S: AsRef<str>>(shape: &[usize], cells: &[S]) -> String {
    let join = |cells: &[S]| {
        cells
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ")
    };
    if shape.len() < 2 {
        return join(cells);
    }
    let cols = shape[shape.len() - 1];
    let rows = shape[shape.len() - 2];
    if cols == 0 || rows == 0 {
        return String::new();
    }
    let plane = rows * cols;
    cells
        .chunks(plane)
        .map(|plane| {
            plane
                .chunks(cols)
                .map(join)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
