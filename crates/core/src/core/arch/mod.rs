//! RISC-V architecture-specific components.
//!
//! This module contains the implementation of core RISC-V architectural elements.
//! It includes the following modules:
//! 1. **CSRs:** Control and Status Register addresses, field masks, and storage.
//! 2. **FPRs:** Floating-Point Register file and `fcsr`.
//! 3. **GPRs:** General-Purpose Register file.

/// Control and Status Register (CSR) definitions and storage.
pub mod csr;
/// Floating-Point Register file implementation.
pub mod fpr;
/// General-Purpose Register file implementation.
pub mod gpr;
