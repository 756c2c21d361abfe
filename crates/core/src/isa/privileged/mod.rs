//! Privileged Architecture Definitions.
//!
//! Defines constants for the machine-mode subset of the privileged
//! architecture that this core implements.
//!
//! # Modules
//!
//! - `cause`: Exception cause codes.
//! - `opcodes`: System instruction opcodes (ECALL, EBREAK, MRET, CSR access).

/// Exception cause code definitions.
pub mod cause;

/// System instruction opcodes (ECALL, EBREAK, MRET, CSR access).
pub mod opcodes;
