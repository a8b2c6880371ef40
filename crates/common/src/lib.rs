//! sd common types and instruction decoding.
//!
//! This crate provides the foundational data structures for the sd
//! character instruction set:
//!
//! - [`Opcode`] — the 20 operator characters
//! - [`Instruction`] — one decoded program character
//! - [`Symbol`] and [`Value`] — runtime values for the machine
//! - [`Program`] — a sequence of instructions
//! - [`DecodeError`] — errors from the strict constructors
//!
//! # Dependencies
//!
//! `thiserror` for error derives and `num-bigint` for unbounded integers.

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use program::Program;
pub use value::{Symbol, Value, ValueKind};
