//! Block Dispatch Loop.
//!
//! This module implements the execution cycle of the CPU. It performs the following:
//! 1. **Block Lookup:** Resolves the current PC through the previous block's
//!    successor prediction, then the block map.
//! 2. **Translation:** Compiles missing blocks through the backend.
//! 3. **Dispatch:** Runs native code and accounts the instructions that ran.
//! 4. **Budgeted Runs:** Repeats dispatch until a cycle budget is spent or the hart stops.

use tracing::trace;

use super::Cpu;
use crate::common::JitError;
use crate::common::constants::{INSTRUCTION_ALIGN_MASK, INSTRUCTION_SIZE};
use crate::jit::CodeGen;

/// Result of a single [`Cpu::step_block`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A compiled block ran.
    Executed {
        /// Guest address the block started at.
        pc_start: u32,
        /// Guest instructions that ran; fewer than the block holds if it was
        /// left early.
        instructions: u32,
    },
    /// The hart is halted; nothing ran.
    Halted,
    /// No block could be compiled at `pc`; the host should interpret it.
    Uncached {
        /// The PC left for the interpreter.
        pc: u32,
    },
    /// The PC was misaligned and an exception was taken instead.
    Trapped,
}

/// Why [`Cpu::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunExit {
    /// The cycle budget was spent.
    Budget,
    /// The hart halted.
    Halted,
    /// A PC could not be compiled; the host should interpret it.
    Uncached {
        /// The PC left for the interpreter.
        pc: u32,
    },
}

impl Cpu {
    /// Dispatches one block at the current PC, compiling it first if needed.
    ///
    /// # Arguments
    ///
    /// * `codegen` - Backend used to compile missing blocks and run them.
    ///
    /// # Returns
    ///
    /// What happened, or a host error from the code arena.
    ///
    /// # Safety
    ///
    /// Every block in the cache must have been compiled by `codegen`. Use the
    /// same backend for the lifetime of the CPU, or flush the JIT before
    /// switching.
    pub unsafe fn step_block<G: CodeGen + ?Sized>(
        &mut self,
        codegen: &mut G,
    ) -> Result<StepOutcome, JitError> {
        if self.halt {
            return Ok(StepOutcome::Halted);
        }

        let pc = self.pc;
        if pc & INSTRUCTION_ALIGN_MASK != 0 {
            let old_pc = self
                .jit
                .prev_block()
                .and_then(|block| self.jit.block(block))
                .map_or(pc, |block| block.pc_end.wrapping_sub(INSTRUCTION_SIZE));
            self.except_inst_misaligned(old_pc);
            return Ok(if self.halt {
                StepOutcome::Halted
            } else {
                StepOutcome::Trapped
            });
        }

        let block = match self.jit.find(pc) {
            Some(block) => block,
            None => match self.jit.translate(pc, self.io.as_mut(), codegen)? {
                Some(block) => block,
                None => return Ok(self.uncached(pc)),
            },
        };

        let Some(entry) = self.jit.enter(block) else {
            return Ok(self.uncached(pc));
        };

        // SAFETY: the entry resolves to finalized code in this CPU's arena,
        // compiled by `codegen` per this function's contract. The arena stays
        // mapped while the block runs even if a handler flushes the JIT.
        let ran = unsafe { codegen.execute(self, entry) }.min(entry.instructions);

        self.csrs.cycle = self.csrs.cycle.wrapping_add(u64::from(ran));
        self.jit.retire(block, ran);

        Ok(StepOutcome::Executed {
            pc_start: entry.pc_start,
            instructions: ran,
        })
    }

    /// Dispatches blocks until `cycles` guest cycles have elapsed.
    ///
    /// # Arguments
    ///
    /// * `codegen` - Backend used to compile and run blocks.
    /// * `cycles` - Cycle budget; the last block may overshoot it.
    ///
    /// # Returns
    ///
    /// Why the loop stopped, or a host error from the code arena.
    ///
    /// # Safety
    ///
    /// Same contract as [`Cpu::step_block`].
    pub unsafe fn run<G: CodeGen + ?Sized>(
        &mut self,
        codegen: &mut G,
        cycles: u64,
    ) -> Result<RunExit, JitError> {
        let target = self.csrs.cycle.saturating_add(cycles);
        while self.csrs.cycle < target {
            // SAFETY: forwarded from the caller.
            match unsafe { self.step_block(codegen)? } {
                StepOutcome::Executed { .. } | StepOutcome::Trapped => {}
                StepOutcome::Halted => return Ok(RunExit::Halted),
                StepOutcome::Uncached { pc } => return Ok(RunExit::Uncached { pc }),
            }
        }

        Ok(if self.halt {
            RunExit::Halted
        } else {
            RunExit::Budget
        })
    }

    fn uncached(&mut self, pc: u32) -> StepOutcome {
        self.jit.stats.uncached_dispatches += 1;
        trace!(pc, "no block compiled, leaving pc to the interpreter");
        StepOutcome::Uncached { pc }
    }
}
