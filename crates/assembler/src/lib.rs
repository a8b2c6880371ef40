//! sd assembler — mnemonic text ↔ character program translation.
//!
//! The assembler is a mechanical 1:1 translation: one line of text per
//! program character.
//!
//! # Usage
//!
//! ```
//! use sd_assembler::{assemble, disassemble};
//!
//! let text = "PUSH 2\nPUSH 3\nADD\nEMIT\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(program.to_text(), "23ar");
//! assert_eq!(disassemble(&program), text);
//! ```
//!
//! # Roundtrip Guarantee
//!
//! `assemble(disassemble(program)) == program` holds for every program.
//! The disassembler writes canonical text; the assembler also accepts
//! lowercase mnemonics, comments, blank lines, and decimal `NOP` codes.

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::AsmError;

use lexer::tokenize_line;
use parser::parse_line;
use sd_common::Program;

/// Assemble text into a program.
///
/// Returns the first error encountered.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let mut instructions = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line, line_num)?;
        if let Some(instr) = parse_line(&tokens, line_num)? {
            instructions.push(instr);
        }
    }

    Ok(Program::new(instructions))
}

/// Disassemble a program into canonical assembly text.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}
