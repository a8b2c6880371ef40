//! Machine state: operand stack, call stack, subroutine table, register,
//! and result sequence.

use std::collections::HashMap;

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use sd_common::{Instruction, Program, Symbol, Value, ValueKind};

use crate::error::RuntimeError;

/// The sd stack machine.
///
/// All state is owned by one instance and lives for a single run.
pub struct Machine<'a> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Operand stack.
    pub(crate) stack: Vec<Value>,
    /// Saved positions of pending calls.
    pub(crate) call_stack: Vec<usize>,
    /// Subroutine name -> position of its opening `{`.
    pub(crate) subroutines: HashMap<Symbol, isize>,
    /// One-slot register, exchanged with the stack top by `t`.
    pub(crate) register: Value,
    /// Values emitted by `r`, in order.
    pub(crate) result: Vec<Value>,
    /// Instruction pointer. Signed so that relative jumps before the
    /// start of the program stay representable.
    pub(crate) ip: isize,
    pub(crate) halted: bool,
}

impl<'a> Machine<'a> {
    /// Create a new machine for the given program.
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            stack: Vec::new(),
            call_stack: Vec::new(),
            subroutines: HashMap::new(),
            register: Value::int(0),
            result: Vec::new(),
            ip: 0,
            halted: false,
        }
    }

    /// Current operand stack, bottom first.
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// Current register contents.
    pub fn register(&self) -> &Value {
        &self.register
    }

    /// Values emitted so far.
    pub fn result(&self) -> &[Value] {
        &self.result
    }

    /// Position of the next instruction to execute.
    pub fn ip(&self) -> isize {
        self.ip
    }

    /// Number of calls awaiting a return.
    pub fn call_depth(&self) -> usize {
        self.call_stack.len()
    }

    /// Start address registered for `name`.
    pub fn subroutine(&self, name: Symbol) -> Option<isize> {
        self.subroutines.get(&name).copied()
    }

    /// True once the machine has stopped, normally or by error.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Encode the result sequence as bytes.
    ///
    /// Fails on the first element that is a symbol or an integer outside
    /// `0..=255`.
    pub fn output(&self) -> Result<Vec<u8>, RuntimeError> {
        self.result
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let byte = match value {
                    Value::Integer(n) => n.to_u8(),
                    Value::Symbol(_) => None,
                };
                byte.ok_or_else(|| RuntimeError::ResultEncoding {
                    index,
                    value: value.clone(),
                })
            })
            .collect()
    }

    /// Fetch the instruction at the current ip, or `None` when the ip is
    /// outside the program.
    pub(crate) fn fetch(&self) -> Option<Instruction> {
        usize::try_from(self.ip)
            .ok()
            .and_then(|pos| self.program.get(pos))
            .copied()
    }

    /// Position reported in errors. Only called while an instruction is
    /// executing, so the ip is inside the program.
    pub(crate) fn at(&self) -> usize {
        self.ip as usize
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// Pop a value from the stack.
    pub(crate) fn pop(&mut self) -> Result<Value, RuntimeError> {
        self.stack
            .pop()
            .ok_or(RuntimeError::StackUnderflow { at: self.at() })
    }

    /// Borrow the stack top without removing it.
    pub(crate) fn peek(&self) -> Result<&Value, RuntimeError> {
        self.stack
            .last()
            .ok_or(RuntimeError::StackUnderflow { at: self.at() })
    }

    pub(crate) fn pop_integer(&mut self) -> Result<BigInt, RuntimeError> {
        let value = self.pop()?;
        self.expect_integer(value)
    }

    pub(crate) fn pop_symbol(&mut self) -> Result<Symbol, RuntimeError> {
        let value = self.pop()?;
        self.expect_symbol(value)
    }

    pub(crate) fn expect_integer(&self, value: Value) -> Result<BigInt, RuntimeError> {
        match value {
            Value::Integer(n) => Ok(n),
            other => Err(self.mismatch(ValueKind::Integer, &other)),
        }
    }

    pub(crate) fn expect_symbol(&self, value: Value) -> Result<Symbol, RuntimeError> {
        match value {
            Value::Symbol(s) => Ok(s),
            other => Err(self.mismatch(ValueKind::Symbol, &other)),
        }
    }

    fn mismatch(&self, expected: ValueKind, found: &Value) -> RuntimeError {
        RuntimeError::TypeMismatch {
            at: self.at(),
            expected,
            found: found.kind(),
        }
    }

    /// Resolve a stack index, counting negative indices from the top
    /// (`-1` is the top element).
    pub(crate) fn resolve_index(&self, index: &BigInt) -> Result<usize, RuntimeError> {
        let length = self.stack.len();
        let resolved = index.to_isize().and_then(|i| {
            if i < 0 {
                length.checked_sub(i.unsigned_abs())
            } else {
                Some(i as usize)
            }
        });
        match resolved {
            Some(pos) if pos < length => Ok(pos),
            _ => Err(RuntimeError::IndexOutOfRange {
                at: self.at(),
                index: index.clone(),
                length,
            }),
        }
    }

    /// Start address of a defined subroutine.
    pub(crate) fn lookup(&self, name: Symbol) -> Result<isize, RuntimeError> {
        self.subroutine(name)
            .ok_or(RuntimeError::UndefinedSubroutine { at: self.at(), name })
    }
}

/// Convert an address or offset to a machine word, saturating. A
/// saturated value always lies outside the program.
pub(crate) fn saturate(n: &BigInt) -> isize {
    n.to_isize().unwrap_or(if n.is_negative() {
        isize::MIN
    } else {
        isize::MAX
    })
}

/// Branch selection for `i` and `k`: only integer zero is false.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Integer(n) => !n.is_zero(),
        Value::Symbol(_) => true,
    }
}
