//! Tokenizer for sd assembly text.

use crate::error::AsmError;

/// A single token from an assembly line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A mnemonic or symbol name. Always uppercase.
    Ident(String),
    /// A numeric literal (decimal or hex).
    Number(u64),
}

/// Tokenize a single line of assembly text.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `;` and extend to end of line.
pub(crate) fn tokenize_line(line: &str, line_num: usize) -> Result<Vec<Token>, AsmError> {
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };

    line.split_whitespace()
        .map(|word| {
            let invalid = || AsmError::InvalidNumber {
                line: line_num,
                token: word.to_string(),
            };
            if let Some(hex) = word.strip_prefix("0x").or_else(|| word.strip_prefix("0X")) {
                u64::from_str_radix(hex, 16)
                    .map(Token::Number)
                    .map_err(|_| invalid())
            } else if word.as_bytes().first().is_some_and(|b| b.is_ascii_digit()) {
                word.parse().map(Token::Number).map_err(|_| invalid())
            } else {
                Ok(Token::Ident(word.to_uppercase()))
            }
        })
        .collect()
}
