//! Trap Handling Logic.
//!
//! This module implements machine-mode trap entry for the CPU. It performs
//! the following:
//! 1. **Exception Helpers:** One entry per condition the core detects, each
//!    choosing the exception PC and trap value.
//! 2. **Context Saving:** Updates `mepc`, `mcause`, `mtval`, `mbadaddr`, and
//!    the interrupt-enable stack in `mstatus`.
//! 3. **Double Fault Detection:** Halts the hart when a second trap is taken
//!    before the handler returns with `MRET`.
//! 4. **Return Handling:** Implements `MRET`.
//!
//! Synchronous exceptions always enter at the `mtvec` base, even in vectored mode.

use tracing::{debug, warn};

use super::Cpu;
use crate::common::Trap;
use crate::common::constants::INSTRUCTION_ALIGN_MASK;
use crate::core::arch::csr::{
    MSTATUS_MIE, MSTATUS_MPIE, MSTATUS_MPP, MSTATUS_MPP_SHIFT, MTVEC_BASE_MASK, PRIV_MACHINE,
};

impl Cpu {
    /// Enters the machine-mode trap handler.
    ///
    /// The trap CSRs are always recorded and `pc` is redirected to the
    /// handler. A trap taken while a previous one is still being handled
    /// (no `MRET` in between) is a double fault and halts the hart.
    ///
    /// # Arguments
    ///
    /// * `cause` - The exception being raised.
    /// * `epc` - The Exception Program Counter saved to `mepc`.
    pub fn trap(&mut self, cause: Trap, epc: u32) {
        let handler = self.csrs.mtvec & MTVEC_BASE_MASK;
        debug!(%cause, epc, handler, "trap");

        let tval = cause.tval();
        self.csrs.mepc = epc;
        self.csrs.mcause = cause.cause();
        self.csrs.mtval = tval;
        self.csrs.mbadaddr = tval;

        let mut mstatus = self.csrs.mstatus;
        let mie = mstatus & MSTATUS_MIE != 0;
        mstatus &= !(MSTATUS_MIE | MSTATUS_MPIE | MSTATUS_MPP);
        if mie {
            mstatus |= MSTATUS_MPIE;
        }
        mstatus |= PRIV_MACHINE << MSTATUS_MPP_SHIFT;
        self.csrs.mstatus = mstatus;

        self.pc = handler;
        self.jit.stats.traps_taken += 1;

        if self.in_trap {
            warn!(%cause, epc, "double fault: trap raised inside the trap handler, halting");
            self.halt = true;
        }
        self.in_trap = true;
    }

    /// Raises an instruction-address-misaligned exception.
    ///
    /// `self.pc` must hold the misaligned target; it becomes `mtval`.
    ///
    /// # Arguments
    ///
    /// * `old_pc` - Address of the control transfer that produced the target.
    pub fn except_inst_misaligned(&mut self, old_pc: u32) {
        self.trap(Trap::InstructionAddressMisaligned(self.pc), old_pc);
    }

    /// Raises a load-address-misaligned exception at `self.pc`.
    pub fn except_load_misaligned(&mut self, addr: u32) {
        self.trap(Trap::LoadAddressMisaligned(addr), self.pc);
    }

    /// Raises a store-address-misaligned exception at `self.pc`.
    pub fn except_store_misaligned(&mut self, addr: u32) {
        self.trap(Trap::StoreAddressMisaligned(addr), self.pc);
    }

    /// Raises an illegal-instruction exception at `self.pc`.
    pub fn except_illegal_inst(&mut self) {
        self.trap(Trap::IllegalInstruction, self.pc);
    }

    /// Returns from a machine-mode trap handler (`MRET`).
    ///
    /// Restores `MIE` from `MPIE`, sets `MPIE`, clears `MPP`, and jumps to `mepc`.
    /// The hart is no longer considered to be inside a trap handler.
    pub fn mret(&mut self) {
        self.in_trap = false;
        let mut mstatus = self.csrs.mstatus;
        let mpie = mstatus & MSTATUS_MPIE != 0;
        mstatus &= !(MSTATUS_MIE | MSTATUS_MPP);
        if mpie {
            mstatus |= MSTATUS_MIE;
        }
        mstatus |= MSTATUS_MPIE;
        self.csrs.mstatus = mstatus;
        self.pc = self.csrs.mepc & !INSTRUCTION_ALIGN_MASK;
    }
}
