//! RISC-V Floating-Point Register File.
//!
//! Holds the 32 single-precision registers as raw IEEE 754 bit patterns
//! together with the `fcsr` word. The whole structure exists only when the
//! F extension is configured in.

use crate::core::arch::csr::{FCSR_MASK, FFLAGS_MASK, FRM_MASK, FRM_SHIFT};

/// Number of floating-point registers.
pub const NUM_FPRS: usize = 32;

/// Floating-point architectural state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FpState {
    regs: [u32; NUM_FPRS],
    /// Floating-point control and status word (flags in bits 0-4, rounding mode in 5-7).
    pub fcsr: u32,
}

impl FpState {
    /// Creates a zeroed floating-point state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the raw bit pattern of a floating-point register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    #[inline(always)]
    pub const fn read(&self, idx: usize) -> u32 {
        self.regs[idx]
    }

    /// Writes the raw bit pattern of a floating-point register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `bits` - The IEEE 754 single-precision bit pattern.
    #[inline(always)]
    pub const fn write(&mut self, idx: usize, bits: u32) {
        self.regs[idx] = bits;
    }

    /// Reads a register as an `f32`.
    pub const fn read_f32(&self, idx: usize) -> f32 {
        f32::from_bits(self.regs[idx])
    }

    /// Writes an `f32` into a register.
    pub const fn write_f32(&mut self, idx: usize, val: f32) {
        self.regs[idx] = val.to_bits();
    }

    /// Accrued exception flags (`fflags` view of `fcsr`).
    pub const fn fflags(&self) -> u32 {
        self.fcsr & FFLAGS_MASK
    }

    /// Dynamic rounding mode (`frm` view of `fcsr`).
    pub const fn frm(&self) -> u32 {
        (self.fcsr >> FRM_SHIFT) & FRM_MASK
    }

    /// Replaces the accrued exception flags, keeping the rounding mode.
    pub const fn set_fflags(&mut self, val: u32) {
        self.fcsr = (self.fcsr & !FFLAGS_MASK) | (val & FFLAGS_MASK);
    }

    /// Replaces the rounding mode, keeping the exception flags.
    pub const fn set_frm(&mut self, val: u32) {
        self.fcsr = (self.fcsr & !(FRM_MASK << FRM_SHIFT)) | ((val & FRM_MASK) << FRM_SHIFT);
    }

    /// Replaces the whole `fcsr` word; bits above 7 are dropped.
    pub const fn set_fcsr(&mut self, val: u32) {
        self.fcsr = val & FCSR_MASK;
    }
}
