use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop the machine.
///
/// All of these are fatal: instructions are never retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("ROM is {size} bytes but only {capacity} bytes are available")]
    RomTooLarge { size: usize, capacity: usize },

    #[error("unable to read ROM")]
    Io(#[from] io::Error),

    #[error("program counter {pc:#05X} does not address a whole opcode")]
    Fetch { pc: u16 },

    #[error("{fault} executing {opcode:#06X} at {pc:#05X}")]
    Execute { pc: u16, opcode: u16, fault: Fault },

    #[error("machine is halted after a fatal error")]
    Halted,
}

/// Why a single instruction could not be decoded or executed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("unknown opcode")]
    UnknownOpcode,

    #[error("address {address:#X} is outside addressable memory")]
    AddressOutOfBounds { address: usize },

    #[error("call stack overflow")]
    StackOverflow,

    #[error("return with an empty call stack")]
    StackUnderflow,
}
