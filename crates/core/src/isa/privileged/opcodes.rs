//! SYSTEM instruction encodings.
//!
//! Every SYSTEM instruction ends a block and runs through the fallback
//! handler. The no-operand forms are matched on the whole word; the CSR
//! forms are told apart by funct3.

/// Major opcode shared by all SYSTEM instructions.
pub const OP_SYSTEM: u32 = 0x73;

/// `ecall`
pub const ECALL: u32 = 0x0000_0073;

/// `ebreak`
pub const EBREAK: u32 = 0x0010_0073;

/// `mret`: return from a machine-mode trap.
pub const MRET: u32 = 0x3020_0073;

/// `wfi`: may be executed as a no-op.
pub const WFI: u32 = 0x1050_0073;

// funct3 of the CSR forms. Bit 2 set means rs1 is a 5-bit zero-extended immediate.
/// `csrrw`
pub const CSRRW: u32 = 1;
/// `csrrs`
pub const CSRRS: u32 = 2;
/// `csrrc`
pub const CSRRC: u32 = 3;
/// `csrrwi`
pub const CSRRWI: u32 = 5;
/// `csrrsi`
pub const CSRRSI: u32 = 6;
/// `csrrci`
pub const CSRRCI: u32 = 7;
