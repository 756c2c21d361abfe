//! RISC-V General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file for the RV32 core.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`).
//! 2. **Uniform Access:** Exposes every slot, `x0` included, without special-casing.
//!    Keeping `x0` at zero is the job of the opcode handlers and the backend.
//! 3. **Debugging:** Formats the complete register state for diagnostics.

use std::fmt;

/// Number of integer registers.
pub const NUM_GPRS: usize = 32;

/// General-Purpose Register file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_GPRS],
}

impl Gpr {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register.
    #[inline(always)]
    pub const fn read(&self, idx: usize) -> u32 {
        self.regs[idx]
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    #[inline(always)]
    pub const fn write(&mut self, idx: usize, val: u32) {
        self.regs[idx] = val;
    }

    /// Returns the whole register file as a slice.
    pub const fn as_slice(&self) -> &[u32; NUM_GPRS] {
        &self.regs
    }

    /// Returns the whole register file mutably, for backends that access it directly.
    pub const fn as_mut_slice(&mut self) -> &mut [u32; NUM_GPRS] {
        &mut self.regs
    }
}

impl fmt::Display for Gpr {
    /// Formats registers in pairs with hexadecimal values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..NUM_GPRS).step_by(2) {
            writeln!(
                f,
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            )?;
        }
        Ok(())
    }
}
