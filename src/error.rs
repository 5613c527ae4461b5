//! Input errors, execution faults, and host faults each get their own
//! type so callers can match on the failure kind instead of parsing
//! strings.

use thiserror::Error;

use crate::opcode::Opcode;

/// Errors that can occur while loading a ROM, before any VM exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RomError {
    #[error("rom not found: {path}")]
    NotFound { path: String },
    #[error("rom too large: {size} bytes, maximum is {max}")]
    TooLarge { size: usize, max: usize },
}

/// Fatal faults raised while executing a decoded instruction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionFault {
    #[error("unsupported opcode {0:#06X}")]
    UnsupportedOpcode(Opcode),
    #[error("stack underflow on RET with an empty call stack")]
    StackUnderflow,
    #[error("stack overflow: call stack already holds 16 return addresses")]
    StackOverflow,
    #[error("program counter {0:#06X} leaves no room to fetch a 2-byte opcode")]
    ProgramCounterOutOfBounds(usize),
}

/// Faults raised while a host adapter is being initialized, before the
/// emulation loop starts.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("video initialization failed: {0}")]
    Video(String),
    #[error("audio initialization failed: {0}")]
    Audio(String),
    #[error("keyboard initialization failed: {0}")]
    Keyboard(String),
}
