//! Global Core Constants.
//!
//! This module defines constants shared across the core. It includes:
//! 1. **Instruction Constants:** Instruction width and alignment for RV32 without compression.
//! 2. **Code Arena Constants:** Alignment of emitted blocks and the headroom kept free while compiling.
//! 3. **Block Map Constants:** Hash multiplier and the minimum table size.

/// Size of a standard (32-bit) RISC-V instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Mask of the PC bits that must be zero for a fetch to be aligned.
pub const INSTRUCTION_ALIGN_MASK: u32 = INSTRUCTION_SIZE - 1;

/// Alignment of the start of every block's native code in the arena.
pub const CODE_ALIGN: usize = 16;

/// Minimum arena space left free before another instruction is compiled.
///
/// When less than this remains, the current block is closed early so the
/// exit stub still fits.
pub const MIN_CODE_HEADROOM: usize = 256;

/// Smallest block map capacity accepted by the configuration.
pub const MIN_BLOCK_MAP_ENTRIES: usize = 4;

/// 64-bit golden-ratio multiplier used to hash guest PCs into the block map.
pub const BLOCK_HASH_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;
