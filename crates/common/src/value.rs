//! Runtime value representation for the sd machine.
//!
//! Values are what live on the operand stack, in the register, and in
//! the result sequence during execution.

use std::fmt;

use num_bigint::BigInt;

use crate::error::DecodeError;

/// A single uppercase letter: `A` through `Z`.
///
/// Symbols are pushed as literals and double as subroutine names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    /// Create a symbol from a letter, or `None` if `c` is not `A..=Z`.
    pub fn new(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Symbol(c as u8))
        } else {
            None
        }
    }

    /// The letter this symbol stands for.
    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl TryFrom<char> for Symbol {
    type Error = DecodeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Symbol::new(c).ok_or(DecodeError::InvalidSymbol(c))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The two shapes a value can take, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Symbol,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Symbol => write!(f, "symbol"),
        }
    }
}

/// Runtime value: an unbounded signed integer or a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Arbitrary-magnitude signed integer.
    Integer(BigInt),
    /// Uppercase letter literal.
    Symbol(Symbol),
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Symbol(_) => ValueKind::Symbol,
        }
    }

    /// Shorthand for an integer value.
    pub fn int(n: impl Into<BigInt>) -> Self {
        Value::Integer(n.into())
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Value::Symbol(sym)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Symbol(s) => write!(f, "{s}"),
        }
    }
}
