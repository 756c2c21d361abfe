//! RISC-V Single-Precision Floating-Point Extension (F).
//!
//! The core does not execute floating-point arithmetic; it only needs the
//! major opcodes to route them and to select immediates for FP loads/stores.

/// Floating-point major opcodes.
pub mod opcodes;
