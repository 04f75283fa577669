//! Single-value domains.

use iv_value::{IndexArray, NumericTower, StringArray, Value};
use std::fmt;

/// Kind check performed by a leaf domain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// Bare strings.
    IsString,
    /// String arrays as they are.
    IsStringArray,
    /// String arrays, plus strings and generic arrays of strings,
    /// converted to string arrays.
    ToStringArray,
    IsNumber,
    IsBool,
    /// Any array kind, the empty array included.
    IsArray,
    IsIndexArray,
    /// Index arrays, plus numbers, booleans and numeric arrays converted
    /// through the numeric tower.
    ToIndexArray,
    IsFunction,
}

impl LeafKind {
    pub fn name(self) -> &'static str {
        match self {
            LeafKind::IsString => "string",
            LeafKind::IsStringArray => "string array",
            LeafKind::ToStringArray => "to string array",
            LeafKind::IsNumber => "number",
            LeafKind::IsBool => "bool",
            LeafKind::IsArray => "array",
            LeafKind::IsIndexArray => "index array",
            LeafKind::ToIndexArray => "to index array",
            LeafKind::IsFunction => "function",
        }
    }

    /// Check the kind and convert. Never returns a partial conversion.
    fn accept(self, tower: &dyn NumericTower, v: &Value) -> Option<Value> {
        match (self, v) {
            (LeafKind::IsString, Value::Str(_))
            | (LeafKind::IsStringArray | LeafKind::ToStringArray, Value::StringArray(_))
            | (LeafKind::IsNumber, Value::Number(_))
            | (LeafKind::IsBool, Value::Bool(_))
            | (LeafKind::IsIndexArray | LeafKind::ToIndexArray, Value::IndexArray(_))
            | (LeafKind::IsFunction, Value::Function(_)) => Some(v.clone()),
            (LeafKind::IsArray, v) if v.is_array() => Some(v.clone()),
            (LeafKind::ToStringArray, v) => to_string_array(v).map(Value::StringArray),
            (LeafKind::ToIndexArray, v) => to_index_array(tower, v).map(Value::IndexArray),
            _ => None,
        }
    }
}

fn to_string_array(v: &Value) -> Option<StringArray> {
    match v {
        Value::Str(s) => Some(StringArray::vector(vec![s.to_string()])),
        Value::EmptyArray => Some(StringArray::vector(Vec::new())),
        Value::Array(a) => {
            let strings = a
                .elems()
                .iter()
                .map(|e| e.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()?;
            StringArray::new(a.shape().to_vec(), strings).ok()
        }
        _ => None,
    }
}

fn scalar_index(tower: &dyn NumericTower, v: &Value) -> Option<i64> {
    match v {
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => tower.to_index(*n),
        _ => None,
    }
}

fn to_index_array(tower: &dyn NumericTower, v: &Value) -> Option<IndexArray> {
    match v {
        Value::Bool(_) | Value::Number(_) => {
            scalar_index(tower, v).map(|i| IndexArray::vector(vec![i]))
        }
        Value::EmptyArray => Some(IndexArray::vector(Vec::new())),
        Value::Array(a) => {
            let ints = a
                .elems()
                .iter()
                .map(|e| scalar_index(tower, e))
                .collect::<Option<Vec<_>>>()?;
            IndexArray::new(a.shape().to_vec(), ints).ok()
        }
        _ => None,
    }
}

/// Domain over one value.
///
/// Leaves own an optional child that receives the converted value; no
/// child accepts the value as it is. `Not` and `Or` reject everything
/// when a child is missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SingleDomain {
    Leaf {
        kind: LeafKind,
        child: Option<Box<SingleDomain>>,
    },
    Not(Option<Box<SingleDomain>>),
    Or(Option<Box<SingleDomain>>, Option<Box<SingleDomain>>),
}

// Constructors

impl SingleDomain {
    pub fn leaf(kind: LeafKind, child: Option<SingleDomain>) -> Self {
        SingleDomain::Leaf {
            kind,
            child: child.map(Box::new),
        }
    }

    pub fn is_string(child: Option<SingleDomain>) -> Self {
        Self::leaf(LeafKind::IsString, child)
    }

    pub fn is_string_array(child: Option<SingleDomain>) -> Self {
        Self::leaf(LeafKind::IsStringArray, child)
    }

    pub fn to_string_array(child: Option<SingleDomain>) -> Self {
        Self::leaf(LeafKind::ToStringArray, child)
    }

    pub fn is_number(child: Option<SingleDomain>) -> Self {
        Self::leaf(LeafKind::IsNumber, child)
    }

    pub fn is_bool(child: Option<SingleDomain>) -> Self {
        Self::leaf(LeafKind::IsBool, child)
    }

    pub fn is_array(child: Option<SingleDomain>) -> Self {
        Self::leaf(LeafKind::IsArray, child)
    }

    pub fn is_index_array(child: Option<SingleDomain>) -> Self {
        Self::leaf(LeafKind::IsIndexArray, child)
    }

    pub fn to_index_array(child: Option<SingleDomain>) -> Self {
        Self::leaf(LeafKind::ToIndexArray, child)
    }

    pub fn is_function(child: Option<SingleDomain>) -> Self {
        Self::leaf(LeafKind::IsFunction, child)
    }

    pub fn not(child: Option<SingleDomain>) -> Self {
        SingleDomain::Not(child.map(Box::new))
    }

    pub fn or(first: Option<SingleDomain>, second: Option<SingleDomain>) -> Self {
        SingleDomain::Or(first.map(Box::new), second.map(Box::new))
    }
}

/// Run `child` on `v`, accepting `v` unchanged when there is no child.
fn propagate(tower: &dyn NumericTower, v: Value, child: Option<&SingleDomain>) -> Option<Value> {
    match child {
        None => Some(v),
        Some(child) => child.to(tower, &v),
    }
}

impl SingleDomain {
    /// Test `v`, returning the converted value on acceptance.
    pub fn to(&self, tower: &dyn NumericTower, v: &Value) -> Option<Value> {
        match self {
            SingleDomain::Leaf { kind, child } => {
                let converted = kind.accept(tower, v)?;
                propagate(tower, converted, child.as_deref())
            }
            SingleDomain::Not(None) | SingleDomain::Or(None, _) | SingleDomain::Or(_, None) => None,
            SingleDomain::Not(Some(child)) => match child.to(tower, v) {
                Some(_) => None,
                None => Some(v.clone()),
            },
            SingleDomain::Or(Some(first), Some(second)) => {
                first.to(tower, v).or_else(|| second.to(tower, v))
            }
        }
    }

    /// Test a possibly absent value. A single domain never accepts an
    /// absent value.
    pub(crate) fn to_opt(&self, tower: &dyn NumericTower, v: Option<&Value>) -> Option<Value> {
        v.and_then(|v| self.to(tower, v))
    }
}

impl fmt::Display for SingleDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SingleDomain::Leaf { kind, child: None } => f.write_str(kind.name()),
            SingleDomain::Leaf {
                kind,
                child: Some(child),
            } => write!(f, "{} {child}", kind.name()),
            SingleDomain::Not(Some(child)) => write!(f, "!{child}"),
            SingleDomain::Or(Some(first), Some(second)) => write!(f, "({first} or {second})"),
            SingleDomain::Not(None) | SingleDomain::Or(..) => f.write_str("never"),
        }
    }
}
