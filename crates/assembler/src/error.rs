//! Error types for the sd assembler.

use thiserror::Error;

/// Errors produced while assembling mnemonic text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// An unrecognized mnemonic was encountered.
    #[error("line {line}: unknown mnemonic '{token}'")]
    UnknownMnemonic { line: usize, token: String },

    /// A mnemonic did not have its argument.
    #[error("line {line}: {mnemonic} expects {expected} argument(s)")]
    MissingArgument {
        line: usize,
        mnemonic: &'static str,
        expected: usize,
    },

    /// A numeric literal could not be parsed or is out of range.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A token appeared where it was not expected.
    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { line: usize, token: String },

    /// PUSH only takes a single decimal digit.
    #[error("line {line}: PUSH takes a digit 0-9, got {value}")]
    DigitOutOfRange { line: usize, value: u64 },

    /// SYM argument is not a single letter.
    #[error("line {line}: invalid symbol '{token}' (expected A-Z)")]
    InvalidSymbol { line: usize, token: String },

    /// NOP codepoint would decode to a real instruction.
    #[error("line {line}: NOP {codepoint:#06x} is not a no-op character")]
    NotANop { line: usize, codepoint: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unknown_mnemonic() {
        let e = AsmError::UnknownMnemonic {
            line: 3,
            token: "FOO".to_string(),
        };
        assert_eq!(e.to_string(), "line 3: unknown mnemonic 'FOO'");
    }

    #[test]
    fn error_display_missing_argument() {
        let e = AsmError::MissingArgument {
            line: 7,
            mnemonic: "PUSH",
            expected: 1,
        };
        assert_eq!(e.to_string(), "line 7: PUSH expects 1 argument(s)");
    }

    #[test]
    fn error_display_invalid_number() {
        let e = AsmError::InvalidNumber {
            line: 2,
            token: "0xZZZZ".to_string(),
        };
        assert_eq!(e.to_string(), "line 2: invalid number '0xZZZZ'");
    }

    #[test]
    fn error_display_digit_out_of_range() {
        let e = AsmError::DigitOutOfRange { line: 1, value: 12 };
        assert_eq!(e.to_string(), "line 1: PUSH takes a digit 0-9, got 12");
    }

    #[test]
    fn error_display_not_a_nop() {
        let e = AsmError::NotANop {
            line: 4,
            codepoint: 0x61,
        };
        assert_eq!(e.to_string(), "line 4: NOP 0x0061 is not a no-op character");
    }
}
