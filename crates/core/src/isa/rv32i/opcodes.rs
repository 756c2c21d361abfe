//! Base integer major opcodes (bits 6-0).
//!
//! Each entry names the immediate format [`decode`](crate::isa::decode::decode)
//! selects for it. All values have the low two bits set: compressed
//! encodings are not supported.

/// `lb`, `lh`, `lw`, `lbu`, `lhu`. I-immediate.
pub const OP_LOAD: u32 = 0x03;

/// `fence`, `fence.i`. No immediate is decoded.
pub const OP_MISC_MEM: u32 = 0x0F;

/// `addi`, `slti`, `xori`, `slli`, ... I-immediate.
pub const OP_IMM: u32 = 0x13;

/// `auipc`. U-immediate.
pub const OP_AUIPC: u32 = 0x17;

/// `sb`, `sh`, `sw`. S-immediate.
pub const OP_STORE: u32 = 0x23;

/// `lr.w`, `sc.w`, `amo*.w`. Decoded as R-type, never compiled.
pub const OP_AMO: u32 = 0x2F;

/// Register-register ALU, including the M extension. Routed to the OP fallback by default.
pub const OP_REG: u32 = 0x33;

/// `lui`. U-immediate.
pub const OP_LUI: u32 = 0x37;

/// `beq`, `bne`, `blt`, `bge`, `bltu`, `bgeu`. B-immediate; ends a block.
pub const OP_BRANCH: u32 = 0x63;

/// `jalr`. I-immediate; ends a block.
pub const OP_JALR: u32 = 0x67;

/// `jal`. J-immediate; ends a block.
pub const OP_JAL: u32 = 0x6F;
