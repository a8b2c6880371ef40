//! Disassembler: character program → canonical assembly text.

use sd_common::{Instruction, Program};

use crate::parser::{NOP, PUSH, SYM};

/// Disassemble a program into canonical assembly text, one line per
/// instruction.
///
/// The output is guaranteed to reassemble to an identical program.
pub fn disassemble(program: &Program) -> String {
    let mut text = String::new();
    for instr in &program.instructions {
        text.push_str(&line(instr));
        text.push('\n');
    }
    text
}

fn line(instr: &Instruction) -> String {
    match *instr {
        Instruction::Digit(d) => format!("{PUSH} {d}"),
        Instruction::Symbol(sym) => format!("{SYM} {sym}"),
        Instruction::Op(op) => op.mnemonic().to_string(),
        Instruction::Nop(c) => format!("{NOP} 0x{:04x}", c as u32),
    }
}
