//! CSR Access Logic.
//!
//! This module implements the Control and Status Register access protocol for
//! the CPU. It performs the following:
//! 1. **Address Resolution:** Maps a 12-bit address onto the closed [`Csr`] set.
//! 2. **Read Operations:** Returns backed values, views of `fcsr` and the cycle
//!    counter, or zero for unbacked and unknown registers.
//! 3. **Write Operations:** Updates backed registers and drops everything else.
//! 4. **Atomic Forms:** `csrrw`, `csrrs`, and `csrrc`, each returning the prior value.
//!
//! Access permissions and read-only checks are the opcode handler's job.

use tracing::trace;

use super::Cpu;
use crate::core::arch::csr::{Csr, FCSR_MASK};

/// Mask of the low word of the 64-bit cycle counter.
const LOW_WORD: u64 = 0xFFFF_FFFF;

impl Cpu {
    /// Reads a Control and Status Register.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    ///
    /// # Returns
    ///
    /// The register value; zero for unbacked or unknown addresses.
    pub fn csr_read(&self, addr: u32) -> u32 {
        let Some(csr) = Csr::from_addr(addr) else {
            trace!(addr, "read of unimplemented csr");
            return 0;
        };

        match csr {
            Csr::Fflags => self.fp.as_ref().map_or(0, |fp| fp.fflags()),
            Csr::Frm => self.fp.as_ref().map_or(0, |fp| fp.frm()),
            Csr::Fcsr => self.fp.as_ref().map_or(0, |fp| fp.fcsr & FCSR_MASK),
            Csr::Mstatus => self.csrs.mstatus,
            Csr::Misa => self.csrs.misa,
            Csr::Mtvec => self.csrs.mtvec,
            Csr::Mscratch => self.csrs.mscratch,
            Csr::Mepc => self.csrs.mepc,
            Csr::Mcause => self.csrs.mcause,
            Csr::Mtval => self.csrs.mtval,
            Csr::Mip => self.csrs.mip,
            Csr::Cycle | Csr::Time | Csr::Instret => (self.csrs.cycle & LOW_WORD) as u32,
            Csr::Cycleh | Csr::Timeh | Csr::Instreth => (self.csrs.cycle >> 32) as u32,
            Csr::Medeleg
            | Csr::Mideleg
            | Csr::Mie
            | Csr::Mcounteren
            | Csr::Mvendorid
            | Csr::Marchid
            | Csr::Mimpid
            | Csr::Mhartid => 0,
        }
    }

    /// Writes a Control and Status Register.
    ///
    /// Writes to unbacked or unknown addresses are dropped.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    /// * `val` - The value to store.
    pub fn csr_write(&mut self, addr: u32, val: u32) {
        let Some(csr) = Csr::from_addr(addr) else {
            trace!(addr, val, "write to unimplemented csr dropped");
            return;
        };

        match csr {
            Csr::Fflags => {
                if let Some(fp) = self.fp.as_mut() {
                    fp.set_fflags(val);
                }
            }
            Csr::Frm => {
                if let Some(fp) = self.fp.as_mut() {
                    fp.set_frm(val);
                }
            }
            Csr::Fcsr => {
                if let Some(fp) = self.fp.as_mut() {
                    fp.set_fcsr(val);
                }
            }
            Csr::Mstatus => self.csrs.mstatus = val,
            Csr::Misa => self.csrs.misa = val,
            Csr::Mtvec => self.csrs.mtvec = val,
            Csr::Mscratch => self.csrs.mscratch = val,
            Csr::Mepc => self.csrs.mepc = val,
            Csr::Mcause => self.csrs.mcause = val,
            Csr::Mtval => self.csrs.mtval = val,
            Csr::Mip => self.csrs.mip = val,
            Csr::Cycle | Csr::Time | Csr::Instret => {
                self.csrs.cycle = (self.csrs.cycle & !LOW_WORD) | u64::from(val);
            }
            Csr::Cycleh | Csr::Timeh | Csr::Instreth => {
                self.csrs.cycle = (self.csrs.cycle & LOW_WORD) | (u64::from(val) << 32);
            }
            Csr::Medeleg
            | Csr::Mideleg
            | Csr::Mie
            | Csr::Mcounteren
            | Csr::Mvendorid
            | Csr::Marchid
            | Csr::Mimpid
            | Csr::Mhartid => {
                trace!(csr = ?csr, val, "write to unbacked csr dropped");
            }
        }
    }

    /// Atomically swaps a CSR with `val`.
    ///
    /// # Returns
    ///
    /// The value held before the write.
    pub fn csrrw(&mut self, addr: u32, val: u32) -> u32 {
        let old = self.csr_read(addr);
        self.csr_write(addr, val);
        old
    }

    /// Atomically sets the bits of `mask` in a CSR.
    ///
    /// # Returns
    ///
    /// The value held before the write.
    pub fn csrrs(&mut self, addr: u32, mask: u32) -> u32 {
        let old = self.csr_read(addr);
        self.csr_write(addr, old | mask);
        old
    }

    /// Atomically clears the bits of `mask` in a CSR.
    ///
    /// # Returns
    ///
    /// The value held before the write.
    pub fn csrrc(&mut self, addr: u32, mask: u32) -> u32 {
        let old = self.csr_read(addr);
        self.csr_write(addr, old & !mask);
        old
    }
}
