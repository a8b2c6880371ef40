//! Decode errors for sd instruction characters.

use thiserror::Error;

/// Errors from the strict constructors in this crate.
///
/// Program text itself never fails to decode (unknown characters become
/// no-ops); these errors surface only when a caller asks for a specific
/// opcode or symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Byte is not one of the operator characters.
    #[error("invalid opcode: {0:?}")]
    InvalidOpcode(char),

    /// Character is not an uppercase ASCII letter.
    #[error("invalid symbol: {0:?} (expected A-Z)")]
    InvalidSymbol(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_opcode() {
        assert_eq!(
            DecodeError::InvalidOpcode('b').to_string(),
            "invalid opcode: 'b'"
        );
    }

    #[test]
    fn display_invalid_symbol() {
        assert_eq!(
            DecodeError::InvalidSymbol('a').to_string(),
            "invalid symbol: 'a' (expected A-Z)"
        );
    }
}
