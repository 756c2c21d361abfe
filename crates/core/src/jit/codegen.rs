//! Native code generation contract.
//!
//! The core does not know the host instruction set. A backend implements
//! [`CodeGen`]: it appends native code for guest instructions through the
//! [`CgState`] handle while a block is compiled, and later runs finalized
//! blocks against the CPU.
//!
//! # Control flow contract
//!
//! A compiled block is entered at its first byte and must return to the
//! caller with `cpu.pc` holding the next guest PC:
//! - the exit stub emitted by [`CodeGen::emit_exit`] sets `pc` to the
//!   fall-through address,
//! - a taken control transfer sets `pc` to its target and leaves the block,
//! - a fallback stub sets `pc` to the instruction's address, calls
//!   [`Jit::dispatch_fallback`](crate::jit::Jit::dispatch_fallback), and leaves
//!   the block if the handler halted the hart or moved `pc` anywhere other
//!   than the next instruction.

use crate::common::BufferFull;
use crate::core::Cpu;
use crate::jit::code_buffer::CgState;
use crate::jit::fallback::FallbackKind;

/// Backend verdict for one guest instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emit {
    /// Code was emitted; the instruction belongs to the block.
    Done,
    /// The backend cannot compile this instruction and emitted nothing.
    /// The block ends before it.
    Declined,
}

/// Entry point of a finalized block, handed to [`CodeGen::execute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockEntry {
    /// First byte of the block's native code.
    pub code: *const u8,
    /// Length of the native code in bytes.
    pub len: usize,
    /// Guest address of the first instruction.
    pub pc_start: u32,
    /// Guest address one past the last instruction.
    pub pc_end: u32,
    /// Number of guest instructions in the block.
    pub instructions: u32,
}

/// Native code emission backend.
pub trait CodeGen {
    /// Emits the block prologue.
    fn emit_prologue(&mut self, cg: &mut CgState<'_>, pc: u32) -> Result<(), BufferFull>;

    /// Emits code for one guest instruction.
    ///
    /// # Arguments
    ///
    /// * `cg` - Emission handle of the block being built.
    /// * `pc` - Guest address of the instruction.
    /// * `inst` - The raw instruction word.
    ///
    /// # Returns
    ///
    /// Whether the instruction was compiled, or `BufferFull` if the arena ran out.
    fn emit_inst(&mut self, cg: &mut CgState<'_>, pc: u32, inst: u32)
    -> Result<Emit, BufferFull>;

    /// Emits a stub that hands one instruction to the fallback handler.
    fn emit_fallback(
        &mut self,
        cg: &mut CgState<'_>,
        kind: FallbackKind,
        pc: u32,
        inst: u32,
    ) -> Result<(), BufferFull>;

    /// Emits the exit stub that leaves the block at `next_pc`.
    fn emit_exit(&mut self, cg: &mut CgState<'_>, next_pc: u32) -> Result<(), BufferFull>;

    /// Runs a finalized block.
    ///
    /// # Returns
    ///
    /// Guest instructions that ran, including one that trapped, halted, or
    /// jumped out of the block. Never more than `entry.instructions`.
    ///
    /// # Safety
    ///
    /// `entry.code` must point to `entry.len` bytes emitted by this backend
    /// and finalized in the CPU's own code buffer. The code buffer must not be
    /// dropped or replaced while the block runs; flushing it is allowed.
    unsafe fn execute(&mut self, cpu: &mut Cpu, entry: BlockEntry) -> u32;
}
