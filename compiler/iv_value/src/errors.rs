//! Evaluation errors.
//!
//! `EvalErrorKind` carries the structured category; factory functions are
//! the only way to build an `EvalError` and fill in both the kind and the
//! rendered message.
//!
//! Domain rejection is not an error: a combinator that does not accept its
//! arguments returns `None` and the resolver moves on. Only running out of
//! handlers produces [`EvalErrorKind::NoMatchingDomain`].

use crate::value::Value;
use iv_ir::Span;
use std::fmt;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Dispatch
    /// Every handler registered for `symbol` rejected the arguments.
    NoMatchingDomain {
        symbol: String,
        left: Option<String>,
        right: String,
        tried: Vec<String>,
    },
    UnknownPrimitive {
        symbol: String,
    },
    UnknownOperator {
        symbol: String,
    },

    // Names
    UndefinedVariable {
        name: String,
    },

    // Closures
    GuardTypeError {
        got: String,
    },
    UnreachableCode {
        statement: String,
    },
    StackOverflow {
        depth: usize,
    },
    NotCallable {
        kind: String,
    },

    // Conversion and shape
    ConversionError {
        from: String,
        to: String,
    },
    ShapeMismatch {
        shape: Vec<usize>,
        len: usize,
    },
    NotAnArray {
        kind: String,
    },
    LengthError {
        expected: usize,
        got: usize,
    },
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },

    // Code loading
    FileSystem {
        path: String,
        message: String,
    },

    /// Errors raised by primitive bodies.
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatchingDomain {
                symbol,
                left,
                right,
                tried,
            } => {
                match left {
                    Some(left) => write!(f, "domain error: {symbol} does not accept L {left} R {right}")?,
                    None => write!(f, "domain error: {symbol} does not accept R {right}")?,
                }
                if !tried.is_empty() {
                    write!(f, " (tried: {})", tried.join("; "))?;
                }
                Ok(())
            }
            Self::UnknownPrimitive { symbol } => write!(f, "unknown primitive: {symbol}"),
            Self::UnknownOperator { symbol } => write!(f, "unknown operator: {symbol}"),
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::GuardTypeError { got } => {
                write!(f, "λ condition does not return a bool: {got}")
            }
            Self::UnreachableCode { statement } => {
                write!(f, "λ contains non-reachable code: {statement}")
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum recursion depth exceeded (limit: {depth})")
            }
            Self::NotCallable { kind } => write!(f, "{kind} is not callable"),
            Self::ConversionError { from, to } => write!(f, "cannot convert {from} to {to}"),
            Self::ShapeMismatch { shape, len } => {
                let dims: Vec<String> = shape.iter().map(ToString::to_string).collect();
                write!(f, "shape [{}] does not match {len} elements", dims.join(" "))
            }
            Self::NotAnArray { kind } => write!(f, "cannot select from {kind}"),
            Self::LengthError { expected, got } => {
                write!(f, "length error: expected {expected} values, got {got}")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::FileSystem { path, message } => write!(f, "{path}: {message}"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Secondary information attached to an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
    pub span: Option<Span>,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span: Some(span),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Equals `kind.to_string()` for factory-built errors.
    pub message: String,
    /// Location of the offending expression, when the evaluator knows it.
    pub span: Option<Span>,
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    /// Error raised by a primitive body.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            notes: Vec::new(),
        }
    }

    /// Attach a span unless one is already set.
    ///
    /// Errors propagate outward through nested expressions; the innermost
    /// location is the useful one.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(span) = self.span {
            write!(f, " at {span}")?;
        }
        for note in &self.notes {
            write!(f, "\n  note: {}", note.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Dispatch Errors

#[cold]
pub fn no_matching_domain(
    symbol: &str,
    left: Option<&Value>,
    right: &Value,
    tried: Vec<String>,
) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoMatchingDomain {
        symbol: symbol.to_string(),
        left: left.map(|v| v.kind_name().to_string()),
        right: right.kind_name().to_string(),
        tried,
    })
}

#[cold]
pub fn unknown_primitive(symbol: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownPrimitive {
        symbol: symbol.to_string(),
    })
}

#[cold]
pub fn unknown_operator(symbol: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownOperator {
        symbol: symbol.to_string(),
    })
}

// Name Errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

// Closure Errors

#[cold]
pub fn guard_type_error(got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::GuardTypeError {
        got: got.kind_name().to_string(),
    })
}

#[cold]
pub fn unreachable_code(statement: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnreachableCode {
        statement: statement.to_string(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        kind: value.kind_name().to_string(),
    })
}

// Conversion Errors

#[cold]
pub fn conversion_error(value: &Value, to: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConversionError {
        from: value.kind_name().to_string(),
        to: to.to_string(),
    })
}

#[cold]
pub fn shape_mismatch(shape: &[usize], len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ShapeMismatch {
        shape: shape.to_vec(),
        len,
    })
}

#[cold]
pub fn not_an_array(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnArray {
        kind: value.kind_name().to_string(),
    })
}

#[cold]
pub fn length_error(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::LengthError { expected, got })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds { index, len })
}

// Code Loading Errors

#[cold]
pub fn vfs_error(path: &str, message: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FileSystem {
        path: path.to_string(),
        message: message.to_string(),
    })
}
