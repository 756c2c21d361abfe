//! Core processor implementation.
//!
//! This module contains the architectural state of one hart, the CSR and trap
//! machinery that operates on it, the block dispatch loop, and the execution
//! units the core itself provides.

/// Architecture-specific components (CSRs, register files).
pub mod arch;
/// CPU state, CSR protocol, trap entry, and block dispatch.
pub mod cpu;
/// Execution units provided by the core (FPU classification).
pub mod units;

pub use self::cpu::Cpu;
