//! Trap and host error definitions.
//!
//! This module defines the two error domains of the core. It provides:
//! 1. **Trap Representation:** The synchronous exceptions raised against the emulated hart.
//! 2. **Resource Exhaustion:** Signals used inside the JIT to trigger a full cache flush.
//! 3. **Host Errors:** Failures of the host environment (arena mapping, page protection,
//!    configuration) surfaced through standard Rust error traits.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::isa::privileged::cause::exception;

/// RISC-V trap types raised by this core.
///
/// Traps transfer control to the machine-mode trap vector. Only the four
/// synchronous exceptions the core itself can detect are represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Instruction address misaligned exception.
    ///
    /// The associated value is the misaligned target address.
    InstructionAddressMisaligned(u32),

    /// Load address misaligned exception.
    ///
    /// The associated value is the misaligned effective address.
    LoadAddressMisaligned(u32),

    /// Store address misaligned exception.
    ///
    /// The associated value is the misaligned effective address.
    StoreAddressMisaligned(u32),

    /// Illegal instruction exception.
    IllegalInstruction,
}

impl Trap {
    /// Returns the exception code written to `mcause`.
    pub const fn cause(&self) -> u32 {
        match self {
            Self::InstructionAddressMisaligned(_) => exception::INSTRUCTION_ADDRESS_MISALIGNED,
            Self::LoadAddressMisaligned(_) => exception::LOAD_ADDRESS_MISALIGNED,
            Self::StoreAddressMisaligned(_) => exception::STORE_ADDRESS_MISALIGNED,
            Self::IllegalInstruction => exception::ILLEGAL_INSTRUCTION,
        }
    }

    /// Returns the trap value written to `mtval` and `mbadaddr`.
    ///
    /// Illegal instructions report zero.
    pub const fn tval(&self) -> u32 {
        match self {
            Self::InstructionAddressMisaligned(addr)
            | Self::LoadAddressMisaligned(addr)
            | Self::StoreAddressMisaligned(addr) => *addr,
            Self::IllegalInstruction => 0,
        }
    }
}

impl fmt::Display for Trap {
    /// Formats the trap for display.
    ///
    /// # Arguments
    ///
    /// * `f` - The formatter to write to.
    ///
    /// # Returns
    ///
    /// A formatting result indicating success or failure.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstructionAddressMisaligned(addr) => {
                write!(f, "InstructionAddressMisaligned({addr:#x})")
            }
            Self::LoadAddressMisaligned(addr) => write!(f, "LoadAddressMisaligned({addr:#x})"),
            Self::StoreAddressMisaligned(addr) => write!(f, "StoreAddressMisaligned({addr:#x})"),
            Self::IllegalInstruction => write!(f, "IllegalInstruction"),
        }
    }
}

impl std::error::Error for Trap {}

/// The code arena has no room left for the block being emitted.
///
/// Never leaves the JIT: the controller answers it with a full flush.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("code buffer exhausted")]
pub struct BufferFull;

/// The block map reached its occupancy limit.
///
/// Handled exactly like [`BufferFull`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("block map occupancy limit reached")]
pub struct MapFull;

/// Invalid core configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The code buffer cannot hold a single block.
    #[error("code buffer size {0} is smaller than the minimum of {1} bytes")]
    CodeBufferTooSmall(usize, usize),

    /// The block map capacity is not a power of two or is too small.
    #[error("block map entries must be a power of two of at least {1}, got {0}")]
    BlockMapEntries(usize, usize),

    /// Blocks must be allowed at least one instruction.
    #[error("max_block_insns must be nonzero")]
    ZeroBlockLimit,

    /// The JSON document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Host-level failure of the JIT subsystem.
#[derive(Debug, Error)]
pub enum JitError {
    /// The code arena could not be mapped.
    #[error("failed to map {size} byte code buffer: {source}")]
    Map {
        /// Requested arena size in bytes.
        size: usize,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Switching the arena between writable and executable failed.
    #[error("failed to change code buffer protection: {0}")]
    Protect(#[source] io::Error),

    /// The configuration was rejected before the JIT was built.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
