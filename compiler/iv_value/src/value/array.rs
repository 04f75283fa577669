//! The array family.
//!
//! All three array kinds keep a shape vector next to a flat element
//! sequence in row-major order. The constructors enforce that the flat
//! length equals the product of the shape.

use super::{Heap, Value};
use crate::errors::{shape_mismatch, EvalError};

/// Number of elements an array of `shape` holds.
pub fn shape_size(shape: &[usize]) -> usize {
    shape.iter().product()
}

fn check_shape(shape: &[usize], len: usize) -> Result<(), EvalError> {
    if shape_size(shape) == len {
        Ok(())
    } else {
        Err(shape_mismatch(shape, len))
    }
}

/// Generic array with heterogeneous elements.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayValue {
    shape: Vec<usize>,
    elems: Heap<Vec<Value>>,
}

impl ArrayValue {
    pub fn new(shape: Vec<usize>, elems: Vec<Value>) -> Result<Self, EvalError> {
        check_shape(&shape, elems.len())?;
        Ok(ArrayValue {
            shape,
            elems: Heap::new(elems),
        })
    }

    /// Rank-1 array.
    pub fn vector(elems: Vec<Value>) -> Self {
        ArrayValue {
            shape: vec![elems.len()],
            elems: Heap::new(elems),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn size(&self) -> usize {
        self.elems.len()
    }

    /// Element at flat index `i`.
    pub fn at(&self, i: usize) -> Option<&Value> {
        self.elems.get(i)
    }

    pub fn elems(&self) -> &[Value] {
        &self.elems
    }
}

/// Array of text elements.
#[derive(Clone, Debug, PartialEq)]
pub struct StringArray {
    shape: Vec<usize>,
    strings: Heap<Vec<String>>,
}

impl StringArray {
    pub fn new(shape: Vec<usize>, strings: Vec<String>) -> Result<Self, EvalError> {
        check_shape(&shape, strings.len())?;
        Ok(StringArray {
            shape,
            strings: Heap::new(strings),
        })
    }

    pub fn vector(strings: Vec<String>) -> Self {
        StringArray {
            shape: vec![strings.len()],
            strings: Heap::new(strings),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn size(&self) -> usize {
        self.strings.len()
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }
}

/// Array of integers.
///
/// Used as ordinary data and as the carrier of selection results: a
/// selective assignment materializes one of these shaped like its target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexArray {
    shape: Vec<usize>,
    ints: Vec<i64>,
}

impl IndexArray {
    pub fn new(shape: Vec<usize>, ints: Vec<i64>) -> Result<Self, EvalError> {
        check_shape(&shape, ints.len())?;
        Ok(IndexArray { shape, ints })
    }

    pub fn vector(ints: Vec<i64>) -> Self {
        IndexArray {
            shape: vec![ints.len()],
            ints,
        }
    }

    /// `1 2 3 ... n` laid out in `shape`, where `n` is the element count.
    pub fn iota(shape: Vec<usize>) -> Self {
        let n = shape_size(&shape);
        let ints = (1..=n)
            .map(|i| i64::try_from(i).unwrap_or(i64::MAX))
            .collect();
        IndexArray { shape, ints }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn size(&self) -> usize {
        self.ints.len()
    }

    pub fn ints(&self) -> &[i64] {
        &self.ints
    }

    /// Copy with every element shifted by `delta`, saturating at the
    /// `i64` bounds.
    #[must_use]
    pub fn offset(&self, delta: i64) -> Self {
        IndexArray {
            shape: self.shape.clone(),
            ints: self.ints.iter().map(|i| i.saturating_add(delta)).collect(),
        }
    }
}
