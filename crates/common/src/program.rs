//! Program representation for sd character programs.
//!
//! A program is a sequence of single-character instructions addressed by
//! zero-based position. There is no header and no separator.

use crate::instruction::Instruction;
use crate::opcode::Opcode;

/// An sd program: a sequence of instructions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// The instruction stream.
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Create a new program from a vector of instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Decode program text, one instruction per character.
    pub fn parse(text: &str) -> Self {
        Self {
            instructions: text.chars().map(Instruction::decode).collect(),
        }
    }

    /// Encode the program back to its text form.
    pub fn to_text(&self) -> String {
        self.instructions.iter().map(Instruction::encode).collect()
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at `pos`, if any.
    pub fn get(&self, pos: usize) -> Option<&Instruction> {
        self.instructions.get(pos)
    }

    /// Position of the `}` closing the block opened at `open`.
    ///
    /// Counts nesting from `open + 1`. Returns `None` when the block is
    /// never closed.
    pub fn matching_close(&self, open: usize) -> Option<usize> {
        let mut level = 1usize;
        for (pos, instr) in self.instructions.iter().enumerate().skip(open + 1) {
            match instr.opcode() {
                Some(Opcode::Begin) => level += 1,
                Some(Opcode::End) => {
                    level -= 1;
                    if level == 0 {
                        return Some(pos);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

impl From<&str> for Program {
    fn from(text: &str) -> Self {
        Program::parse(text)
    }
}
