//! Translation blocks.
//!
//! A block describes one contiguous run of guest instructions
//! `[pc_start, pc_end)` compiled to native code. The header lives in the
//! code buffer's block table; the native code lives in the arena and is
//! addressed by a [`CodeRegion`]. Both are reclaimed only by a full reset.

/// Generation-tagged handle to a block in the code buffer.
///
/// A handle taken before a reset carries the old generation and resolves to
/// nothing afterwards, so stale predictions and map entries can never reach
/// reclaimed code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockRef {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl BlockRef {
    /// Position of the block in the code buffer's block table.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Arena generation the handle was issued in.
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

/// Location of a block's native code inside the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CodeRegion {
    /// Byte offset from the start of the arena.
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
}

impl CodeRegion {
    /// One past the last byte of the region.
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// One compiled basic block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Number of guest instructions covered (always nonzero).
    pub instructions: u32,
    /// Address of the first instruction.
    pub pc_start: u32,
    /// Address one past the last instruction.
    pub pc_end: u32,
    /// Block executed after this one last time; a hint, never trusted blindly.
    pub predict: Option<BlockRef>,
    /// Finalized native code.
    pub code: CodeRegion,
    /// Execution count, present only when profiling is enabled.
    pub hit_count: Option<u64>,
}

impl Block {
    /// Returns true if `pc` lies inside the block's guest range.
    pub const fn contains(&self, pc: u32) -> bool {
        pc >= self.pc_start && pc < self.pc_end
    }
}
