//! Block-based JIT translation cache.
//!
//! This module turns guest basic blocks into cached native code. It provides:
//! 1. **Blocks:** Headers describing compiled guest ranges ([`block`]).
//! 2. **Arena:** The bump-allocated code buffer blocks are emitted into ([`code_buffer`]).
//! 3. **Index:** The fixed-capacity map from start PC to block ([`block_map`]).
//! 4. **Contracts:** The emission backend ([`codegen`]) and the fallback handler ([`fallback`]).
//! 5. **Controller:** [`Jit`], which compiles blocks, predicts successors, and
//!    flushes the whole cache when the arena or the map runs out of room.

/// Translation block headers and handles.
pub mod block;
/// Fixed-capacity map from start PC to block.
pub mod block_map;
/// Code arena and per-block emission handle.
pub mod code_buffer;
/// Native code emission backend contract.
pub mod codegen;
/// Fallback handlers for uncompiled instruction categories.
pub mod fallback;

use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::common::constants::{INSTRUCTION_SIZE, MIN_CODE_HEADROOM};
use crate::common::{BufferFull, JitError, MapFull};
use crate::config::JitConfig;
use crate::core::Cpu;
use crate::io::Io;
use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes::OP_SYSTEM;
use crate::isa::rv32i::opcodes::{OP_BRANCH, OP_JAL, OP_JALR};
use crate::stats::JitStats;

pub use self::block::{Block, BlockRef, CodeRegion};
pub use self::block_map::BlockMap;
pub use self::code_buffer::{CgState, CodeBuffer};
pub use self::codegen::{BlockEntry, CodeGen, Emit};
pub use self::fallback::{FallbackHandler, FallbackKind};

/// Returns true if `inst` ends a basic block.
///
/// Branches, jumps, and SYSTEM instructions can all move the PC away from
/// the next sequential instruction.
#[inline]
pub fn is_block_terminator(inst: u32) -> bool {
    matches!(inst.opcode(), OP_BRANCH | OP_JAL | OP_JALR | OP_SYSTEM)
}

/// Result of one compilation attempt.
enum Compiled {
    /// A block was emitted and stored in the code buffer.
    Block(BlockRef),
    /// The first instruction could not be compiled.
    Empty,
    /// The arena ran out of room; nothing was committed.
    Exhausted,
}

/// JIT controller embedded in every [`Cpu`].
///
/// Owns the code buffer and the block map, remembers the last block
/// dispatched so its successor prediction can be updated, and holds the
/// host's fallback handler.
pub struct Jit {
    buffer: CodeBuffer,
    map: BlockMap,
    fallback: Rc<dyn FallbackHandler>,
    config: JitConfig,
    trace_blocks: bool,
    prev: Option<BlockRef>,
    pub(crate) stats: JitStats,
}

impl fmt::Debug for Jit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jit")
            .field("buffer", &self.buffer)
            .field("map", &self.map)
            .field("config", &self.config)
            .field("prev", &self.prev)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Jit {
    /// Allocates the code arena and the block map.
    ///
    /// # Arguments
    ///
    /// * `config` - Arena size, map capacity, block limit, and routing switches.
    /// * `trace_blocks` - Log every compiled block at debug level.
    /// * `fallback` - Handler for instructions routed away from the backend.
    ///
    /// # Returns
    ///
    /// The controller, or `JitError::Map` if the arena could not be mapped.
    pub fn new(
        config: &JitConfig,
        trace_blocks: bool,
        fallback: Rc<dyn FallbackHandler>,
    ) -> Result<Self, JitError> {
        let buffer = CodeBuffer::new(config.code_buffer_size, config.write_xor_execute)?;
        let map = BlockMap::new(config.block_map_entries);
        debug!(
            arena_bytes = buffer.capacity(),
            map_slots = map.capacity(),
            "jit initialized"
        );
        Ok(Self {
            buffer,
            map,
            fallback,
            config: config.clone(),
            trace_blocks,
            prev: None,
            stats: JitStats::default(),
        })
    }

    /// The code arena.
    pub const fn code_buffer(&self) -> &CodeBuffer {
        &self.buffer
    }

    /// The block map.
    pub const fn block_map(&self) -> &BlockMap {
        &self.map
    }

    /// The JIT configuration in effect.
    pub const fn config(&self) -> &JitConfig {
        &self.config
    }

    /// Runtime statistics.
    pub const fn stats(&self) -> &JitStats {
        &self.stats
    }

    /// The block dispatched most recently, if it survived the last flush.
    pub const fn prev_block(&self) -> Option<BlockRef> {
        self.prev
    }

    /// Resolves a block handle.
    pub fn block(&self, block: BlockRef) -> Option<&Block> {
        self.buffer.block(block)
    }

    /// Looks up the live block starting at `pc` without touching statistics.
    pub fn lookup(&self, pc: u32) -> Option<BlockRef> {
        self.map
            .lookup(pc)
            .filter(|&block| self.buffer.block(block).is_some())
    }

    /// Discards every compiled block.
    ///
    /// Resets the code buffer, clears the block map, and forgets the previous
    /// block. Every [`BlockRef`] issued so far stops resolving.
    pub fn flush(&mut self) {
        self.buffer.reset();
        self.map.clear();
        self.prev = None;
        self.stats.cache_flushes += 1;
        debug!(generation = self.buffer.generation(), "translation cache flushed");
    }

    /// Finds the block for `pc`, consulting the successor prediction first.
    pub(crate) fn find(&mut self, pc: u32) -> Option<BlockRef> {
        let predicted = self
            .prev
            .and_then(|prev| self.buffer.block(prev))
            .and_then(|block| block.predict);
        if let Some(predicted) = predicted {
            if self
                .buffer
                .block(predicted)
                .is_some_and(|block| block.pc_start == pc)
            {
                self.stats.predict_hits += 1;
                return Some(predicted);
            }
            self.stats.predict_misses += 1;
            trace!(pc, "successor prediction missed");
        }

        let found = self.lookup(pc);
        if found.is_some() {
            self.stats.map_hits += 1;
        } else {
            self.stats.map_misses += 1;
        }
        found
    }

    /// Compiles the block starting at `pc` and registers it in the map.
    ///
    /// If the arena or the map is out of room, the whole cache is flushed and
    /// compilation is retried once.
    ///
    /// # Arguments
    ///
    /// * `pc` - Guest address of the first instruction.
    /// * `io` - Instruction fetch capability.
    /// * `codegen` - Emission backend.
    ///
    /// # Returns
    ///
    /// The new block, or `None` if not even one instruction could be compiled
    /// (the caller interprets `pc` instead).
    pub fn translate<G: CodeGen + ?Sized>(
        &mut self,
        pc: u32,
        io: &mut dyn Io,
        codegen: &mut G,
    ) -> Result<Option<BlockRef>, JitError> {
        for attempt in 0..2 {
            match self.compile(pc, io, codegen)? {
                Compiled::Block(block) => match self.map.insert(pc, block) {
                    Ok(()) => {
                        self.stats.blocks_compiled += 1;
                        return Ok(Some(block));
                    }
                    Err(MapFull) => debug!(pc, "block map full"),
                },
                Compiled::Empty => return Ok(None),
                Compiled::Exhausted => debug!(pc, "code buffer full"),
            }
            if attempt == 0 {
                self.flush();
            }
        }
        warn!(pc, "block does not fit in an empty translation cache");
        Ok(None)
    }

    fn compile<G: CodeGen + ?Sized>(
        &mut self,
        pc_start: u32,
        io: &mut dyn Io,
        codegen: &mut G,
    ) -> Result<Compiled, JitError> {
        let head = self.buffer.head();
        self.buffer.make_writable()?;
        let outcome = {
            let mut cg = self.buffer.begin();
            match Self::emit_block(&self.config, &mut cg, pc_start, io, codegen) {
                Ok((0, _)) => Ok(None),
                Ok((instructions, pc_end)) => Ok(Some((cg.finalize(), instructions, pc_end))),
                Err(BufferFull) => Err(BufferFull),
            }
        };
        if let Err(err) = self.buffer.make_executable() {
            // The region was finalized but never got a header.
            self.buffer.rewind(head);
            return Err(err);
        }

        let (code, instructions, pc_end) = match outcome {
            Ok(Some(emitted)) => emitted,
            Ok(None) => return Ok(Compiled::Empty),
            Err(BufferFull) => return Ok(Compiled::Exhausted),
        };

        if self.trace_blocks {
            debug!(
                pc_start,
                pc_end,
                instructions,
                bytes = code.len,
                offset = code.offset,
                "compiled block"
            );
        }

        let block = Block {
            instructions,
            pc_start,
            pc_end,
            predict: None,
            code,
            hit_count: self.config.profile.then_some(0),
        };
        Ok(Compiled::Block(self.buffer.push_block(block)))
    }

    /// Emits one block and returns its instruction count and end PC.
    fn emit_block<G: CodeGen + ?Sized>(
        config: &JitConfig,
        cg: &mut CgState<'_>,
        pc_start: u32,
        io: &mut dyn Io,
        codegen: &mut G,
    ) -> Result<(u32, u32), BufferFull> {
        codegen.emit_prologue(cg, pc_start)?;

        let mut pc = pc_start;
        let mut instructions = 0;
        while instructions < config.max_block_insns {
            if instructions > 0 && cg.remaining() < MIN_CODE_HEADROOM {
                break;
            }
            let Some(next_pc) = pc.checked_add(INSTRUCTION_SIZE) else {
                break;
            };

            let inst = io.fetch_u32(pc);
            match FallbackKind::route(config, inst) {
                Some(kind) => codegen.emit_fallback(cg, kind, pc, inst)?,
                None => {
                    if codegen.emit_inst(cg, pc, inst)? == Emit::Declined {
                        break;
                    }
                }
            }

            instructions += 1;
            pc = next_pc;
            if is_block_terminator(inst) {
                break;
            }
        }

        if instructions > 0 {
            codegen.emit_exit(cg, pc)?;
        }
        Ok((instructions, pc))
    }

    /// Prepares `block` for dispatch and records it as the previous block's successor.
    pub(crate) fn enter(&mut self, block: BlockRef) -> Option<BlockEntry> {
        let header = self.buffer.block(block)?;
        let entry = BlockEntry {
            code: self.buffer.code_ptr(header.code)?,
            len: header.code.len,
            pc_start: header.pc_start,
            pc_end: header.pc_end,
            instructions: header.instructions,
        };

        if let Some(prev) = self.prev.and_then(|prev| self.buffer.block_mut(prev)) {
            prev.predict = Some(block);
        }
        self.prev = Some(block);
        Some(entry)
    }

    /// Accounts for a block that finished executing after `instructions` ran.
    pub(crate) fn retire(&mut self, block: BlockRef, instructions: u32) {
        self.stats.blocks_executed += 1;
        self.stats.instructions_executed += u64::from(instructions);
        if let Some(hits) = self
            .buffer
            .block_mut(block)
            .and_then(|header| header.hit_count.as_mut())
        {
            *hits += 1;
        }
    }

    /// Hands one instruction to the CPU's fallback handler.
    ///
    /// Called by the code emitted from [`CodeGen::emit_fallback`] with
    /// `cpu.pc` set to the instruction's address.
    pub fn dispatch_fallback(cpu: &mut Cpu, kind: FallbackKind, inst: u32) {
        let handler = Rc::clone(&cpu.jit.fallback);
        cpu.jit.stats.fallback_calls += 1;
        match kind {
            FallbackKind::Op => handler.op_op(cpu, inst),
            FallbackKind::Fp => handler.op_fp(cpu, inst),
            FallbackKind::System => handler.op_system(cpu, inst),
        }
    }
}
