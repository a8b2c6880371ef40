//! Parser for sd assembly tokens → instructions.

use crate::error::AsmError;
use crate::lexer::Token;
use sd_common::opcode::ALL_OPCODES;
use sd_common::{Instruction, Opcode, Symbol};

pub(crate) const PUSH: &str = "PUSH";
pub(crate) const SYM: &str = "SYM";
pub(crate) const NOP: &str = "NOP";

fn lookup_opcode(mnemonic: &str) -> Option<Opcode> {
    ALL_OPCODES
        .iter()
        .find(|op| op.mnemonic() == mnemonic)
        .copied()
}

/// Parse the tokens of a single line into an instruction.
///
/// Returns `Ok(None)` for blank lines (empty token list).
pub(crate) fn parse_line(tokens: &[Token], line_num: usize) -> Result<Option<Instruction>, AsmError> {
    let Some((head, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let mnemonic = match head {
        Token::Ident(s) => s.as_str(),
        Token::Number(n) => {
            return Err(AsmError::UnexpectedToken {
                line: line_num,
                token: n.to_string(),
            })
        }
    };

    let instr = match mnemonic {
        PUSH => {
            let value = expect_number(args, line_num, PUSH)?;
            if value > 9 {
                return Err(AsmError::DigitOutOfRange {
                    line: line_num,
                    value,
                });
            }
            Instruction::Digit(value as u8)
        }
        SYM => {
            let sym = expect_symbol(args, line_num)?;
            Instruction::Symbol(sym)
        }
        NOP => {
            let codepoint = expect_number(args, line_num, NOP)?;
            let c = u32::try_from(codepoint)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| AsmError::InvalidNumber {
                    line: line_num,
                    token: format!("{codepoint:#x}"),
                })?;
            match Instruction::decode(c) {
                nop @ Instruction::Nop(_) => nop,
                _ => {
                    return Err(AsmError::NotANop {
                        line: line_num,
                        codepoint: c as u32,
                    })
                }
            }
        }
        other => {
            let opcode = lookup_opcode(other).ok_or_else(|| AsmError::UnknownMnemonic {
                line: line_num,
                token: other.to_string(),
            })?;
            Instruction::Op(opcode)
        }
    };

    let consumed = usize::from(!matches!(instr, Instruction::Op(_)));
    expect_end(&args[consumed..], line_num)?;
    Ok(Some(instr))
}

fn expect_number(args: &[Token], line_num: usize, mnemonic: &'static str) -> Result<u64, AsmError> {
    match args.first() {
        Some(Token::Number(n)) => Ok(*n),
        Some(Token::Ident(s)) => Err(AsmError::UnexpectedToken {
            line: line_num,
            token: s.clone(),
        }),
        None => Err(AsmError::MissingArgument {
            line: line_num,
            mnemonic,
            expected: 1,
        }),
    }
}

fn expect_symbol(args: &[Token], line_num: usize) -> Result<Symbol, AsmError> {
    let token = match args.first() {
        Some(Token::Ident(s)) => s.clone(),
        Some(Token::Number(n)) => n.to_string(),
        None => {
            return Err(AsmError::MissingArgument {
                line: line_num,
                mnemonic: SYM,
                expected: 1,
            })
        }
    };
    let mut chars = token.chars();
    match (chars.next().and_then(Symbol::new), chars.next()) {
        (Some(sym), None) => Ok(sym),
        _ => Err(AsmError::InvalidSymbol {
            line: line_num,
            token,
        }),
    }
}

fn expect_end(rest: &[Token], line_num: usize) -> Result<(), AsmError> {
    match rest.first() {
        None => Ok(()),
        Some(tok) => Err(AsmError::UnexpectedToken {
            line: line_num,
            token: match tok {
                Token::Ident(s) => s.clone(),
                Token::Number(n) => n.to_string(),
            },
        }),
    }
}
