//! Evaluation errors.
//!
//! `EvalErrorKind` gives every failure a typed category; the factory
//! functions below are the public way to build one and they fill both `kind`
//! and `message`. Cancellation travels through the same channel as an
//! ordinary error while a script unwinds, but `exec` never hands it to the
//! embedder as an error.

use std::fmt;

use gha_syntax::{BinaryOp, Span};

use crate::value::Value;

/// Result of evaluating an expression or calling a builtin.
pub type EvalResult = Result<Value, EvalError>;

/// The way an argument failed its parameter contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractViolation {
    TooManyPositional { max: usize, got: usize },
    UnknownKeyword,
    Duplicate,
    WrongKind { expected: &'static str, got: String },
    Missing,
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// A call's arguments did not satisfy the callee's signature.
    ArgumentContract {
        function: String,
        param: String,
        violation: ContractViolation,
    },
    /// A host operation failed; `operation` is the qualified script name.
    Host {
        operation: String,
        message: String,
    },

    // Access
    UndefinedName {
        name: String,
    },
    UndefinedAttr {
        type_name: String,
        name: String,
    },
    KeyNotFound {
        key: String,
    },
    IndexOutOfBounds {
        index: String,
        len: usize,
    },
    FrozenValue {
        type_name: String,
    },
    Unhashable {
        type_name: String,
    },
    ImmutableAttr {
        type_name: String,
        name: String,
    },

    // Operators
    TypeMismatch {
        expected: String,
        got: String,
    },
    InvalidBinaryOp {
        op: BinaryOp,
        left: String,
        right: String,
    },
    InvalidUnaryOp {
        op: &'static str,
        operand: String,
    },
    DivisionByZero,
    /// `str * int` or `list * int` would exceed the repetition limit.
    RepetitionTooLarge {
        type_name: String,
    },
    NotCallable {
        type_name: String,
    },

    /// Raised by the script itself through `fail`.
    Fail {
        message: String,
    },
    /// The run thread was cancelled; unwinds the script.
    Cancelled {
        reason: String,
    },
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentContract {
                function,
                param,
                violation,
            } => match violation {
                ContractViolation::TooManyPositional { max, got } => {
                    let noun = if *max == 1 { "argument" } else { "arguments" };
                    write!(
                        f,
                        "{function}: got {got} positional arguments, want at most {max} {noun}"
                    )
                }
                ContractViolation::UnknownKeyword => {
                    write!(f, "{function}: unexpected keyword argument {param}")
                }
                ContractViolation::Duplicate => {
                    write!(f, "{function}: got multiple values for parameter {param}")
                }
                ContractViolation::WrongKind { expected, got } => {
                    write!(f, "{function}: for parameter {param}: got {got}, want {expected}")
                }
                ContractViolation::Missing => {
                    write!(f, "{function}: missing argument for {param}")
                }
            },
            Self::Host { operation, message } => write!(f, "{operation}: {message}"),

            Self::UndefinedName { name } => write!(f, "undefined: {name}"),
            Self::UndefinedAttr { type_name, name } => {
                write!(f, "{type_name} has no .{name} field or method")
            }
            Self::KeyNotFound { key } => write!(f, "key {key} not in dict"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of range [0:{len}]")
            }
            Self::FrozenValue { type_name } => {
                write!(f, "cannot modify frozen {type_name} value")
            }
            Self::Unhashable { type_name } => write!(f, "unhashable type: {type_name}"),
            Self::ImmutableAttr { type_name, name } => {
                write!(f, "cannot set .{name} field of immutable {type_name}")
            }

            Self::TypeMismatch { expected, got } => write!(f, "got {got}, want {expected}"),
            Self::InvalidBinaryOp { op, left, right } => {
                write!(f, "unknown binary op: {left} {} {right}", op.as_symbol())
            }
            Self::InvalidUnaryOp { op, operand } => {
                write!(f, "unknown unary op: {op} {operand}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::RepetitionTooLarge { type_name } => {
                write!(f, "{type_name} repetition is too large")
            }
            Self::NotCallable { type_name } => write!(f, "invalid call of non-function ({type_name})"),

            Self::Fail { message } => write!(f, "fail: {message}"),
            Self::Cancelled { reason } => write!(f, "cancelled: {reason}"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Source location of the innermost expression that failed.
    pub span: Option<Span>,
}

impl EvalError {
    /// Create an uncategorized error.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            span: None,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
        }
    }

    /// Attach a source span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless a more precise one is already set.
    #[must_use]
    pub fn or_span(self, span: Span) -> Self {
        if self.span.is_some() {
            self
        } else {
            self.with_span(span)
        }
    }

    /// The cancellation reason, when this error is an unwinding cancellation.
    pub fn cancellation(&self) -> Option<&str> {
        match &self.kind {
            EvalErrorKind::Cancelled { reason } => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Argument contract

#[cold]
pub fn argument_contract(function: &str, param: &str, violation: ContractViolation) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentContract {
        function: function.to_string(),
        param: param.to_string(),
        violation,
    })
}

// Host

#[cold]
pub fn host_error(operation: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Host {
        operation: operation.to_string(),
        message: message.into(),
    })
}

// Access

#[cold]
pub fn undefined_name(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedName {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_attr(type_name: &str, name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedAttr {
        type_name: type_name.to_string(),
        name: name.to_string(),
    })
}

#[cold]
pub fn key_not_found(key: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound { key: key.repr() })
}

#[cold]
pub fn index_out_of_bounds(index: impl fmt::Display, len: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds {
        index: index.to_string(),
        len,
    })
}

#[cold]
pub fn frozen_value(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FrozenValue {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn unhashable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Unhashable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn immutable_attr(type_name: &str, name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImmutableAttr {
        type_name: type_name.to_string(),
        name: name.to_string(),
    })
}

// Operators

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn invalid_binary_op(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn invalid_unary_op(op: &'static str, operand: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp {
        op,
        operand: operand.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn repetition_too_large(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RepetitionTooLarge {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

// Script-level

#[cold]
pub fn fail(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Fail {
        message: message.into(),
    })
}

#[cold]
pub fn cancelled(reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Cancelled {
        reason: reason.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_argument_message() {
        let err = argument_contract("githubactions.add_mask", "value", ContractViolation::Missing);
        assert_eq!(err.message, "githubactions.add_mask: missing argument for value");
        assert_eq!(err.to_string(), err.message);
    }

    #[test]
    fn wrong_kind_message() {
        let err = argument_contract(
            "githubactions.set_output",
            "value",
            ContractViolation::WrongKind {
                expected: "string",
                got: "int".into(),
            },
        );
        assert_eq!(
            err.message,
            "githubactions.set_output: for parameter value: got int, want string"
        );
    }

    #[test]
    fn host_message_is_prefixed_once() {
        let err = host_error("githubactions.add_step_summary", "file command unavailable");
        assert_eq!(
            err.message,
            "githubactions.add_step_summary: file command unavailable"
        );
    }

    #[test]
    fn or_span_keeps_inner_span() {
        let err = division_by_zero()
            .or_span(Span::new(4, 5))
            .or_span(Span::new(0, 9));
        assert_eq!(err.span, Some(Span::new(4, 5)));
    }

    #[test]
    fn cancellation_is_recognized() {
        assert_eq!(cancelled("boom").cancellation(), Some("boom"));
        assert_eq!(fail("boom").cancellation(), None);
    }
}
