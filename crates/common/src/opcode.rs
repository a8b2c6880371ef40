//! Operator characters of the sd instruction set.
//!
//! Digits and uppercase letters are literals and live in
//! [`Instruction`](crate::Instruction); everything here consumes or
//! rearranges the operand stack, or moves the instruction pointer.

use crate::error::DecodeError;

/// One variant per operator character.
///
/// The discriminant is the ASCII byte of the character, so `op as u8`
/// is the program text for that operator.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Subroutine blocks
    /// Push own position, then skip to the matching `}`.
    Begin = b'{',
    /// Return to the caller, or halt when there is none.
    End = b'}',

    // Arithmetic
    /// Pop b, pop a, push a + b.
    Add = b'a',
    /// Pop b, pop a, push a - b.
    Sub = b's',
    /// Pop b, pop a, push a * b.
    Mul = b'm',
    /// Pop b, pop a, push floor(a / b). Division by zero is a runtime error.
    Div = b'd',

    // Control flow
    /// Pop name, call the subroutine registered under it.
    Call = b'c',
    /// Pop if-false, if-true, condition; call the selected subroutine.
    CallIf = b'i',
    /// Pop target; symbolic jump or relative jump by an integer offset.
    Jump = b'j',
    /// Pop if-false, if-true, condition; jump to the selected target.
    JumpIf = b'k',
    /// Pop name, pop start address, register the subroutine.
    Define = b'f',
    /// Stop execution.
    Halt = b'h',

    // Stack manipulation
    /// Pop and discard.
    Drop = b'q',
    /// Push a copy of the top.
    Dup = b'w',
    /// Swap the top two values.
    Swap = b'e',
    /// Push the stack length.
    Depth = b'z',
    /// Pop index, push the value at that index.
    Get = b'x',
    /// Pop value, pop index, overwrite the value at that index.
    Set = b'y',
    /// Swap the top of the stack with the register.
    Xreg = b't',

    // Output
    /// Copy the top of the stack to the result sequence.
    Emit = b'r',
}

/// All opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 20] = [
    Opcode::Begin,
    Opcode::End,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Call,
    Opcode::CallIf,
    Opcode::Jump,
    Opcode::JumpIf,
    Opcode::Define,
    Opcode::Halt,
    Opcode::Drop,
    Opcode::Dup,
    Opcode::Swap,
    Opcode::Depth,
    Opcode::Get,
    Opcode::Set,
    Opcode::Xreg,
    Opcode::Emit,
];

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            b'{' => Ok(Opcode::Begin),
            b'}' => Ok(Opcode::End),

            b'a' => Ok(Opcode::Add),
            b's' => Ok(Opcode::Sub),
            b'm' => Ok(Opcode::Mul),
            b'd' => Ok(Opcode::Div),

            b'c' => Ok(Opcode::Call),
            b'i' => Ok(Opcode::CallIf),
            b'j' => Ok(Opcode::Jump),
            b'k' => Ok(Opcode::JumpIf),
            b'f' => Ok(Opcode::Define),
            b'h' => Ok(Opcode::Halt),

            b'q' => Ok(Opcode::Drop),
            b'w' => Ok(Opcode::Dup),
            b'e' => Ok(Opcode::Swap),
            b'z' => Ok(Opcode::Depth),
            b'x' => Ok(Opcode::Get),
            b'y' => Ok(Opcode::Set),
            b't' => Ok(Opcode::Xreg),

            b'r' => Ok(Opcode::Emit),

            _ => Err(DecodeError::InvalidOpcode(value as char)),
        }
    }
}

impl Opcode {
    /// Decode a program character, if it is an operator.
    pub fn from_char(c: char) -> Option<Self> {
        u8::try_from(c).ok().and_then(|b| Opcode::try_from(b).ok())
    }

    /// The program character for this opcode.
    pub fn as_char(self) -> char {
        self as u8 as char
    }

    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Begin => "BEGIN",
            Opcode::End => "END",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Call => "CALL",
            Opcode::CallIf => "CALL_IF",
            Opcode::Jump => "JUMP",
            Opcode::JumpIf => "JUMP_IF",
            Opcode::Define => "DEFINE",
            Opcode::Halt => "HALT",
            Opcode::Drop => "DROP",
            Opcode::Dup => "DUP",
            Opcode::Swap => "SWAP",
            Opcode::Depth => "DEPTH",
            Opcode::Get => "GET",
            Opcode::Set => "SET",
            Opcode::Xreg => "XREG",
            Opcode::Emit => "EMIT",
        }
    }
}
