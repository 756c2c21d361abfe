//! RV32I base integer encodings, plus the M extension's funct codes.
//!
//! `opcodes` holds the major opcodes, `funct3` and `funct7` the minor
//! fields that tell instructions under one major opcode apart.

/// Minor opcodes (bits 14-12).
pub mod funct3;

/// OP_REG selector (bits 31-25).
pub mod funct7;

/// Major opcodes (bits 6-0).
pub mod opcodes;
