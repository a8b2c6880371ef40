//! Runtime errors for the sd machine.
//!
//! Every error aborts the run. Errors raised while executing an
//! instruction carry its position (`at`); the final output encoding
//! failure carries the offending result index instead.

use num_bigint::BigInt;
use sd_common::{Symbol, Value, ValueKind};
use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Pop or peek on an empty operand stack.
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },

    /// `x` or `y` with an index outside the stack.
    #[error("stack index {index} out of range (length {length}) at instruction {at}")]
    IndexOutOfRange {
        at: usize,
        index: BigInt,
        length: usize,
    },

    /// Call or jump to a name that was never defined.
    #[error("undefined subroutine {name} at instruction {at}")]
    UndefinedSubroutine { at: usize, name: Symbol },

    /// `d` with a zero divisor.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// An operand had the wrong kind.
    #[error("type mismatch at instruction {at}: expected {expected}, found {found}")]
    TypeMismatch {
        at: usize,
        expected: ValueKind,
        found: ValueKind,
    },

    /// A result element does not fit in a single byte.
    #[error("result element {index} ({value}) is not a byte")]
    ResultEncoding { index: usize, value: Value },
}

impl RuntimeError {
    /// Short name of the error kind, for front ends.
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeError::StackUnderflow { .. } => "StackUnderflow",
            RuntimeError::IndexOutOfRange { .. } => "IndexOutOfRange",
            RuntimeError::UndefinedSubroutine { .. } => "UndefinedSubroutine",
            RuntimeError::DivisionByZero { .. } => "DivisionByZero",
            RuntimeError::TypeMismatch { .. } => "TypeMismatch",
            RuntimeError::ResultEncoding { .. } => "ResultEncodingError",
        }
    }
}
