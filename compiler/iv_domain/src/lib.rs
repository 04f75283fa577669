//! iv Domain - argument domains and primitive dispatch.
//!
//! A primitive symbol may have many implementations, each valid only for
//! some kinds of arguments. Every implementation is registered together
//! with a [`Domain`] describing what it accepts. At call time the
//! [`Registry`] tries the domains in registration order and runs the first
//! implementation whose domain accepts, handing it the arguments as the
//! domain converted them.
//!
//! # Combinators
//!
//! - [`SingleDomain`]: tests (and possibly converts) one value. Leaves
//!   check a value kind and hand the result to an optional child, so a
//!   chain like `to string array` → `string array` reads innermost first.
//! - [`Domain`]: tests a left/right pair. The monadic case is a pair
//!   whose left side is absent.
//!
//! Rejection is not an error. A domain that does not accept returns
//! `None` and leaves the inputs untouched; only exhausting every handler
//! of a symbol is reported, as `NoMatchingDomain`.

mod domain;
mod registry;
mod shared;
mod single;

pub use domain::Domain;
pub use registry::{Dispatch, OperatorArity, Registry};
pub use shared::SharedRegistry;
pub use single::{LeafKind, SingleDomain};
