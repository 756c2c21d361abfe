//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains definitions for opcodes, function codes, and decoding logic, organized
//! by RISC-V extension.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set (32-bit), including the M funct7 marker.
//! * `rv32f`: Standard Extension for Single-Precision Floating-Point.
//! * `privileged`: Privileged Architecture (trap causes, system instructions).

/// Immediate and field decoding for all RV32 instruction formats.
pub mod decode;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Privileged architecture definitions (trap causes, system instructions).
pub mod privileged;

/// Single-precision floating-point extension opcodes.
pub mod rv32f;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;
