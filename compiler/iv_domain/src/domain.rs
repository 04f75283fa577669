//! Pair domains.

use crate::SingleDomain;
use iv_value::{NumericTower, Value};
use std::fmt;

/// Domain over a left/right argument pair.
///
/// The left side of a monadic call is `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Domain {
    /// Both sides pass the same single domain, each converted on its own.
    /// Without a child every pair is accepted unchanged.
    Both(Option<SingleDomain>),
    /// The left side passes, or failing that the right side does. Only the
    /// accepted side is converted.
    Any(SingleDomain),
    /// Independent tests per side; a missing side accepts anything.
    Split(Option<SingleDomain>, Option<SingleDomain>),
    /// Left absent, right passes the child.
    Monadic(Option<SingleDomain>),
    /// Left present, the pair passes the child.
    Dyadic(Option<Box<Domain>>),
}

impl Domain {
    pub fn dyadic(child: Option<Domain>) -> Self {
        Domain::Dyadic(child.map(Box::new))
    }

    /// Test a pair, returning the converted pair on acceptance.
    pub fn to(
        &self,
        tower: &dyn NumericTower,
        left: Option<&Value>,
        right: &Value,
    ) -> Option<(Option<Value>, Value)> {
        match self {
            Domain::Both(None) => Some((left.cloned(), right.clone())),
            Domain::Both(Some(same)) => {
                let l = same.to_opt(tower, left)?;
                let r = same.to(tower, right)?;
                Some((Some(l), r))
            }
            Domain::Any(child) => {
                if let Some(l) = child.to_opt(tower, left) {
                    return Some((Some(l), right.clone()));
                }
                let r = child.to(tower, right)?;
                Some((left.cloned(), r))
            }
            Domain::Split(ld, rd) => {
                let l = match ld {
                    Some(ld) => Some(ld.to_opt(tower, left)?),
                    None => left.cloned(),
                };
                let r = match rd {
                    Some(rd) => rd.to(tower, right)?,
                    None => right.clone(),
                };
                Some((l, r))
            }
            Domain::Monadic(_) if left.is_some() => None,
            Domain::Monadic(None) => Some((None, right.clone())),
            Domain::Monadic(Some(rd)) => rd.to(tower, right).map(|r| (None, r)),
            Domain::Dyadic(_) if left.is_none() => None,
            Domain::Dyadic(None) => Some((left.cloned(), right.clone())),
            Domain::Dyadic(Some(child)) => child.to(tower, left, right),
        }
    }

    /// Whether this domain only accepts calls with a left argument.
    pub fn is_dyadic(&self) -> bool {
        matches!(self, Domain::Dyadic(_))
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Both(None) => f.write_str("any"),
            Domain::Both(Some(same)) => write!(f, "both {same}"),
            Domain::Any(child) => write!(f, "any {child}"),
            Domain::Split(ld, rd) => {
                f.write_str("L ")?;
                match ld {
                    Some(ld) => write!(f, "{ld}")?,
                    None => f.write_str("any")?,
                }
                f.write_str(" R ")?;
                match rd {
                    Some(rd) => write!(f, "{rd}"),
                    None => f.write_str("any"),
                }
            }
            Domain::Monadic(None) => f.write_str("R any"),
            Domain::Monadic(Some(rd)) => write!(f, "{rd}"),
            Domain::Dyadic(None) => f.write_str("L any, R any"),
            Domain::Dyadic(Some(child)) => write!(f, "{child}"),
        }
    }
}

#[cfg(test)]
mod tests;
