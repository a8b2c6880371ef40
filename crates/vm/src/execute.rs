//! Main execution loop and instruction dispatch for the sd machine.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;
use sd_common::{Instruction, Opcode, Value};
use tracing::{debug, trace};

use crate::error::RuntimeError;
use crate::machine::{is_truthy, saturate, Machine};

/// What happens to the ip after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Move to the next position. Calls and symbolic jumps also return
    /// this: they set the ip to a `{`, and the advance enters the body.
    Advance,
    /// The ip already holds the final target (relative jumps).
    Jumped,
    /// Stop the machine.
    Halt,
}

impl<'a> Machine<'a> {
    /// Run until the machine halts, then encode the result sequence.
    pub fn execute(&mut self) -> Result<Vec<u8>, RuntimeError> {
        let mut steps: u64 = 0;
        while self.step()? {
            steps += 1;
        }
        debug!(steps, emitted = self.result.len(), "machine halted");
        self.output()
    }

    /// Execute one instruction.
    ///
    /// Returns `Ok(false)` without doing anything once the machine has
    /// halted or the ip has left the program. An error halts the machine.
    pub fn step(&mut self) -> Result<bool, RuntimeError> {
        if self.halted {
            return Ok(false);
        }
        let Some(instr) = self.fetch() else {
            self.halted = true;
            return Ok(false);
        };

        trace!(ip = self.ip, instruction = %instr, depth = self.stack.len(), "step");

        match self.dispatch(instr) {
            Ok(Flow::Advance) => self.ip = self.ip.saturating_add(1),
            Ok(Flow::Jumped) => {}
            Ok(Flow::Halt) => self.halted = true,
            Err(e) => {
                debug!(error = %e, "machine aborted");
                self.halted = true;
                return Err(e);
            }
        }
        Ok(true)
    }

    fn dispatch(&mut self, instr: Instruction) -> Result<Flow, RuntimeError> {
        let op = match instr {
            Instruction::Digit(d) => {
                self.push(Value::int(d));
                return Ok(Flow::Advance);
            }
            Instruction::Symbol(sym) => {
                self.push(Value::Symbol(sym));
                return Ok(Flow::Advance);
            }
            Instruction::Nop(_) => return Ok(Flow::Advance),
            Instruction::Op(op) => op,
        };

        match op {
            // Subroutine blocks
            Opcode::Begin => self.exec_begin(),
            Opcode::End => Ok(self.exec_return()),
            Opcode::Define => self.exec_define(),

            // Arithmetic
            Opcode::Add => self.exec_binary_arith(|a, b| a + b),
            Opcode::Sub => self.exec_binary_arith(|a, b| a - b),
            Opcode::Mul => self.exec_binary_arith(|a, b| a * b),
            Opcode::Div => self.exec_div(),

            // Control flow
            Opcode::Call => {
                let target = self.pop()?;
                self.call(target)
            }
            Opcode::CallIf => {
                let branch = self.pop_branch()?;
                self.call(branch)
            }
            Opcode::Jump => {
                let target = self.pop()?;
                self.jump(target)
            }
            Opcode::JumpIf => {
                let branch = self.pop_branch()?;
                self.jump(branch)
            }
            Opcode::Halt => Ok(Flow::Halt),

            // Stack manipulation
            Opcode::Drop => {
                self.pop()?;
                Ok(Flow::Advance)
            }
            Opcode::Dup => {
                let top = self.peek()?.clone();
                self.push(top);
                Ok(Flow::Advance)
            }
            Opcode::Swap => {
                let a = self.pop()?;
                let b = self.pop()?;
                self.push(a);
                self.push(b);
                Ok(Flow::Advance)
            }
            Opcode::Depth => {
                self.push(Value::int(self.stack.len()));
                Ok(Flow::Advance)
            }
            Opcode::Get => self.exec_get(),
            Opcode::Set => self.exec_set(),
            Opcode::Xreg => {
                let value = self.pop()?;
                let previous = std::mem::replace(&mut self.register, value);
                self.push(previous);
                Ok(Flow::Advance)
            }

            // Output
            Opcode::Emit => {
                let top = self.peek()?.clone();
                self.result.push(top);
                Ok(Flow::Advance)
            }
        }
    }

    // ---- Subroutine blocks ----

    /// Push own position and skip past the matching `}`. An unclosed
    /// block skips to the end of the program.
    fn exec_begin(&mut self) -> Result<Flow, RuntimeError> {
        let open = self.at();
        self.push(Value::int(open));
        self.ip = match self.program.matching_close(open) {
            Some(close) => close as isize,
            None => self.program.len() as isize,
        };
        Ok(Flow::Advance)
    }

    /// Resume after the most recent call, or halt when nothing is pending.
    fn exec_return(&mut self) -> Flow {
        match self.call_stack.pop() {
            Some(caller) => {
                debug!(from = self.ip, to = caller, depth = self.call_stack.len(), "return");
                self.ip = caller as isize;
                Flow::Advance
            }
            None => Flow::Halt,
        }
    }

    fn exec_define(&mut self) -> Result<Flow, RuntimeError> {
        let name = self.pop_symbol()?;
        let start = self.pop_integer()?;
        let start = saturate(&start);
        debug!(%name, start, "define subroutine");
        self.subroutines.insert(name, start);
        Ok(Flow::Advance)
    }

    // ---- Arithmetic ----

    /// Pop b, pop a, push `op(a, b)`.
    fn exec_binary_arith(
        &mut self,
        op: fn(&BigInt, &BigInt) -> BigInt,
    ) -> Result<Flow, RuntimeError> {
        let b = self.pop_integer()?;
        let a = self.pop_integer()?;
        self.push(Value::Integer(op(&a, &b)));
        Ok(Flow::Advance)
    }

    /// Floor division: rounds toward negative infinity.
    fn exec_div(&mut self) -> Result<Flow, RuntimeError> {
        let b = self.pop_integer()?;
        let a = self.pop_integer()?;
        if b.is_zero() {
            return Err(RuntimeError::DivisionByZero { at: self.at() });
        }
        self.push(Value::Integer(a.div_floor(&b)));
        Ok(Flow::Advance)
    }

    // ---- Control flow ----

    /// Pop if-false, if-true and the condition; return the chosen branch.
    fn pop_branch(&mut self) -> Result<Value, RuntimeError> {
        let if_false = self.pop()?;
        let if_true = self.pop()?;
        let cond = self.pop()?;
        Ok(if is_truthy(&cond) { if_true } else { if_false })
    }

    /// Save the current position and enter the named subroutine.
    fn call(&mut self, target: Value) -> Result<Flow, RuntimeError> {
        let name = self.expect_symbol(target)?;
        let start = self.lookup(name)?;
        let caller = self.at();
        self.call_stack.push(caller);
        debug!(%name, from = caller, depth = self.call_stack.len(), "call");
        self.ip = start;
        Ok(Flow::Advance)
    }

    /// Symbolic jump through the subroutine table, or relative jump by an
    /// integer offset landing exactly on `ip + offset`.
    fn jump(&mut self, target: Value) -> Result<Flow, RuntimeError> {
        match target {
            Value::Symbol(name) => {
                self.ip = self.lookup(name)?;
                Ok(Flow::Advance)
            }
            Value::Integer(offset) => {
                self.ip = self.ip.saturating_add(saturate(&offset));
                Ok(Flow::Jumped)
            }
        }
    }

    // ---- Indexed stack access ----

    fn exec_get(&mut self) -> Result<Flow, RuntimeError> {
        let index = self.pop_integer()?;
        let pos = self.resolve_index(&index)?;
        let value = self.stack[pos].clone();
        self.push(value);
        Ok(Flow::Advance)
    }

    fn exec_set(&mut self) -> Result<Flow, RuntimeError> {
        let value = self.pop()?;
        let index = self.pop_integer()?;
        let pos = self.resolve_index(&index)?;
        self.stack[pos] = value;
        Ok(Flow::Advance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_common::Program;

    fn flow_of(text: &str, steps: usize) -> (Flow, isize) {
        let program = Program::parse(text);
        let mut m = Machine::new(&program);
        for _ in 0..steps {
            m.step().unwrap();
        }
        let instr = m.fetch().unwrap();
        let flow = m.dispatch(instr).unwrap();
        (flow, m.ip)
    }

    #[test]
    fn literals_advance() {
        assert_eq!(flow_of("5", 0), (Flow::Advance, 0));
        assert_eq!(flow_of("Q", 0), (Flow::Advance, 0));
        assert_eq!(flow_of("?", 0), (Flow::Advance, 0));
    }

    #[test]
    fn relative_jump_suppresses_advance() {
        assert_eq!(flow_of("3j", 1), (Flow::Jumped, 4));
        assert_eq!(flow_of("0j", 1), (Flow::Jumped, 1));
    }

    #[test]
    fn symbolic_jump_lands_on_open_brace() {
        // ip is left on the `{`; the advance enters the body.
        assert_eq!(flow_of("{}AfAj", 4), (Flow::Advance, 0));
    }

    #[test]
    fn call_lands_on_open_brace() {
        assert_eq!(flow_of("9{}AfAc", 5), (Flow::Advance, 1));
    }

    #[test]
    fn begin_leaves_ip_on_close() {
        assert_eq!(flow_of("{12}", 0), (Flow::Advance, 3));
        assert_eq!(flow_of("{12", 0), (Flow::Advance, 3));
    }

    #[test]
    fn return_without_caller_halts() {
        assert_eq!(flow_of("}", 0), (Flow::Halt, 0));
    }

    #[test]
    fn halt() {
        assert_eq!(flow_of("h", 0), (Flow::Halt, 0));
    }

    #[test]
    fn conditional_jump_flows() {
        assert_eq!(flow_of("123k", 3), (Flow::Jumped, 5));
        assert_eq!(flow_of("023k", 3), (Flow::Jumped, 6));
    }

    #[test]
    fn errors_halt_the_machine() {
        let program = Program::parse("q5r");
        let mut m = Machine::new(&program);
        assert_eq!(m.step(), Err(RuntimeError::StackUnderflow { at: 0 }));
        assert!(m.is_halted());
        assert_eq!(m.step(), Ok(false));
    }
}
