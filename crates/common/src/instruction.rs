//! One decoded program character.

use std::fmt;

use crate::opcode::Opcode;
use crate::value::Symbol;

/// A single instruction, decoded from exactly one program character.
///
/// Decoding is total: characters that are neither literals nor operators
/// decode to [`Instruction::Nop`] and do nothing when executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `0`..`9`: push the digit as an integer.
    Digit(u8),
    /// `A`..`Z`: push the letter as a symbol.
    Symbol(Symbol),
    /// An operator character.
    Op(Opcode),
    /// Any other character.
    Nop(char),
}

impl Instruction {
    /// Decode one program character.
    pub fn decode(c: char) -> Self {
        if c.is_ascii_digit() {
            Instruction::Digit(c as u8 - b'0')
        } else if let Some(sym) = Symbol::new(c) {
            Instruction::Symbol(sym)
        } else if let Some(op) = Opcode::from_char(c) {
            Instruction::Op(op)
        } else {
            Instruction::Nop(c)
        }
    }

    /// The program character this instruction was decoded from.
    pub fn encode(&self) -> char {
        match *self {
            Instruction::Digit(d) => (b'0' + d) as char,
            Instruction::Symbol(sym) => sym.as_char(),
            Instruction::Op(op) => op.as_char(),
            Instruction::Nop(c) => c,
        }
    }

    /// The opcode, if this is an operator.
    pub fn opcode(&self) -> Option<Opcode> {
        match *self {
            Instruction::Op(op) => Some(op),
            _ => None,
        }
    }
}

impl From<Opcode> for Instruction {
    fn from(op: Opcode) -> Self {
        Instruction::Op(op)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_digits() {
        for (i, c) in ('0'..='9').enumerate() {
            assert_eq!(Instruction::decode(c), Instruction::Digit(i as u8));
        }
    }

    #[test]
    fn decode_symbols() {
        let i = Instruction::decode('M');
        assert_eq!(i, Instruction::Symbol(Symbol::new('M').unwrap()));
    }

    #[test]
    fn decode_operators() {
        assert_eq!(Instruction::decode('a'), Instruction::Op(Opcode::Add));
        assert_eq!(Instruction::decode('{'), Instruction::Op(Opcode::Begin));
        assert_eq!(Instruction::decode('}'), Instruction::Op(Opcode::End));
    }

    #[test]
    fn unknown_characters_are_nops() {
        for c in [' ', '\n', '+', 'b', '٣', '€'] {
            assert_eq!(Instruction::decode(c), Instruction::Nop(c));
        }
    }

    #[test]
    fn encode_returns_source_character() {
        for c in "09AZ{}asmdcijkfqwezxytrh !b".chars() {
            assert_eq!(Instruction::decode(c).encode(), c);
        }
    }

    #[test]
    fn opcode_accessor() {
        assert_eq!(Instruction::decode('h').opcode(), Some(Opcode::Halt));
        assert_eq!(Instruction::decode('5').opcode(), None);
    }
}
