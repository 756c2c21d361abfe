//! Minor opcodes in bits 14-12, grouped by the major opcode they qualify.
//!
//! The same value means different things under different major opcodes, so
//! always match on `opcode` first.

// OP_LOAD
/// `lb`
pub const LB: u32 = 0;
/// `lh`
pub const LH: u32 = 1;
/// `lw`
pub const LW: u32 = 2;
/// `lbu`
pub const LBU: u32 = 4;
/// `lhu`
pub const LHU: u32 = 5;

// OP_STORE
/// `sb`
pub const SB: u32 = 0;
/// `sh`
pub const SH: u32 = 1;
/// `sw`
pub const SW: u32 = 2;

// OP_BRANCH (funct3 2 and 3 are reserved)
/// `beq`
pub const BEQ: u32 = 0;
/// `bne`
pub const BNE: u32 = 1;
/// `blt`
pub const BLT: u32 = 4;
/// `bge`
pub const BGE: u32 = 5;
/// `bltu`
pub const BLTU: u32 = 6;
/// `bgeu`
pub const BGEU: u32 = 7;

// OP_IMM and OP_REG with funct7 DEFAULT or SUB_SRA
/// `add`/`sub`/`addi`; `sub` is selected by funct7.
pub const ADD_SUB: u32 = 0;
/// `sll`/`slli`
pub const SLL: u32 = 1;
/// `slt`/`slti`
pub const SLT: u32 = 2;
/// `sltu`/`sltiu`
pub const SLTU: u32 = 3;
/// `xor`/`xori`
pub const XOR: u32 = 4;
/// `srl`/`sra` and their immediate forms; `sra` is selected by funct7.
pub const SRL_SRA: u32 = 5;
/// `or`/`ori`
pub const OR: u32 = 6;
/// `and`/`andi`
pub const AND: u32 = 7;

// OP_REG with funct7 M_EXTENSION
/// `mul`
pub const MUL: u32 = 0;
/// `mulh`
pub const MULH: u32 = 1;
/// `mulhsu`
pub const MULHSU: u32 = 2;
/// `mulhu`
pub const MULHU: u32 = 3;
/// `div`
pub const DIV: u32 = 4;
/// `divu`
pub const DIVU: u32 = 5;
/// `rem`
pub const REM: u32 = 6;
/// `remu`
pub const REMU: u32 = 7;
