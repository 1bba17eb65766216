use std::error;
use std::fmt;
use std::io;

use crate::memory::Word;

/// A condition that aborts execution. Every variant is fatal to the run;
/// the dispatcher stops and surfaces it to the caller.
#[derive(Debug)]
pub enum Fault {
    /// The word at the instruction pointer names no defined operation.
    InvalidOpcode { opcode: Word },
    /// A source operand above 32775, or an `OUT` value above 255.
    InvalidOperand { value: Word },
    /// A destination operand that is not a register address (32768..=32775).
    InvalidDestination { addr: Word },
    /// `POP` on an empty stack. `RET` on an empty stack halts instead.
    StackUnderflow,
    /// A jump target or memory access at or beyond the address space.
    AddressOutOfRange { addr: Word },
    /// `MOD` with a zero divisor.
    DivideByZero,
    /// The input or output channel failed.
    Io(io::Error),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::InvalidOpcode { opcode } => {
                write!(f, "invalid opcode `{}`", opcode)
            }
            Fault::InvalidOperand { value } => {
                write!(f, "invalid operand value `{}`", value)
            }
            Fault::InvalidDestination { addr } => {
                write!(f, "destination `{}` is not a register address", addr)
            }
            Fault::StackUnderflow => f.write_str("pop from an empty stack"),
            Fault::AddressOutOfRange { addr } => {
                write!(f, "address `0x{:04x}` is outside the address space", addr)
            }
            Fault::DivideByZero => f.write_str("modulo by zero"),
            Fault::Io(err) => write!(f, "i/o channel failure: {}", err),
        }
    }
}

impl error::Error for Fault {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Fault::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Fault {
    fn from(err: io::Error) -> Self {
        Fault::Io(err)
    }
}
