//! Bits 31-25 of an OP_REG instruction.
//!
//! Under OP_IMM the same bits only matter for `srai`, where bit 30 selects
//! the arithmetic shift.

/// Base ALU encoding: `add`, `srl`, and the rest.
pub const DEFAULT: u32 = 0x00;

/// Alternate encoding, only valid with funct3 `ADD_SUB` (`sub`) or `SRL_SRA` (`sra`).
pub const SUB_SRA: u32 = 0x20;

/// Multiply/divide group; funct3 picks the operation.
pub const M_EXTENSION: u32 = 0x01;
