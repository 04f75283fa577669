//! Numbers and the numeric tower seam.
//!
//! Promotion rules and arithmetic belong to the numeric tower, which is
//! supplied from outside. The evaluator and the domain library only need
//! two conversions from it.

use std::fmt;

/// Scalar number.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// APL rendering with high minus: `¯3`, `2.5`.
    pub fn render(self) -> String {
        match self {
            Number::Int(n) if n < 0 => format!("¯{}", n.unsigned_abs()),
            Number::Int(n) => n.to_string(),
            Number::Float(f) if f < 0.0 => format!("¯{}", -f),
            Number::Float(f) => f.to_string(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Conversions the evaluator needs from the numeric model.
pub trait NumericTower: Send + Sync {
    /// Boolean value of a number, if it has one.
    ///
    /// Guard conditions accept a number only when this returns `Some`.
    fn to_bool(&self, n: Number) -> Option<bool>;

    /// Integer index value of a number, if it has one.
    fn to_index(&self, n: Number) -> Option<i64>;
}

/// Default tower: `0` and `1` are booleans, integral numbers are indexes.
#[derive(Copy, Clone, Debug, Default)]
pub struct StandardTower;

/// Largest float that converts to `i64` without saturating.
const MAX_EXACT_INDEX: f64 = 9_007_199_254_740_992.0;

impl NumericTower for StandardTower {
    fn to_bool(&self, n: Number) -> Option<bool> {
        match n {
            Number::Int(0) => Some(false),
            Number::Int(1) => Some(true),
            Number::Float(f) if f == 0.0 => Some(false),
            Number::Float(f) if f == 1.0 => Some(true),
            Number::Int(_) | Number::Float(_) => None,
        }
    }

    fn to_index(&self, n: Number) -> Option<i64> {
        match n {
            Number::Int(i) => Some(i),
            Number::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INDEX => {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "integral and within the exactly representable range"
                )]
                Some(f as i64)
            }
            Number::Float(_) => None,
        }
    }
}
