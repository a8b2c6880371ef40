//! sd virtual machine — executes character-encoded stack programs.
//!
//! The machine has:
//! - An operand stack of integers and symbols
//! - A call stack of saved positions
//! - A subroutine table mapping symbols to block addresses
//! - A one-slot register
//! - A result sequence, encoded to bytes when the run ends
//!
//! # Usage
//!
//! ```
//! use sd_common::Program;
//! use sd_vm::run;
//!
//! let program = Program::parse("23ar");
//! assert_eq!(run(&program).unwrap(), vec![5]);
//! ```

pub mod error;
pub mod execute;
pub mod machine;

pub use error::RuntimeError;
pub use machine::Machine;

use sd_common::Program;
use tracing::instrument;

/// Execute a program and return its output bytes.
///
/// The run ends when the ip leaves the program, `h` executes, or `}`
/// executes with no pending call. None of these is an error.
///
/// # Errors
///
/// Returns [`RuntimeError`] on the first failing instruction, or when the
/// result sequence holds a value that is not a byte.
#[instrument(skip_all, fields(len = program.len()))]
pub fn run(program: &Program) -> Result<Vec<u8>, RuntimeError> {
    let mut machine = Machine::new(program);
    machine.execute()
}

/// Decode and execute program text.
pub fn run_str(text: &str) -> Result<Vec<u8>, RuntimeError> {
    run(&Program::parse(text))
}
