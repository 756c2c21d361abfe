//! Single-precision major opcodes.
//!
//! Loads and stores are compiled like their integer counterparts. The
//! arithmetic opcodes are routed to the FP fallback when it is enabled.

/// `flw`. I-immediate.
pub const OP_LOAD_FP: u32 = 0x07;

/// `fsw`. S-immediate.
pub const OP_STORE_FP: u32 = 0x27;

/// `fmadd.s`. R4-type; bits 26-25 carry `fmt`.
pub const OP_FMADD: u32 = 0x43;

/// `fmsub.s`. R4-type.
pub const OP_FMSUB: u32 = 0x47;

/// `fnmsub.s`. R4-type.
pub const OP_FNMSUB: u32 = 0x4B;

/// `fnmadd.s`. R4-type.
pub const OP_FNMADD: u32 = 0x4F;

/// `fadd.s`, `fclass.s`, `fcvt.*`, ... R-type; funct7 picks the operation.
pub const OP_FP: u32 = 0x53;
