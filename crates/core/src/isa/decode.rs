//! RISC-V Instruction Decoder.
//!
//! This module handles the decoding of 32-bit RISC-V instruction encodings. It
//! provides a pure function per immediate format plus the narrow-load sign
//! extension helpers, and a `decode` entry point that extracts every field of
//! an instruction into a `Decoded` record.
//!
//! Signed immediates are reassembled into a left-aligned accumulator whose bit
//! 31 is the immediate's sign bit, then shifted right arithmetically so the sign
//! propagates in a single step. Every function is total over all 2^32 inputs.

use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv32f::opcodes as fp_opcodes;
use crate::isa::rv32i::opcodes;

/// Bit shift for extracting the I-Type immediate (bits 20-31).
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
const I_IMM_SHIFT: u32 = 20;

/// Mask of the S-Type `imm[11:5]` field, already in its accumulator position.
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
const S_IMM_11_5_MASK: u32 = 0xFE00_0000;

/// Mask of the S-Type `imm[4:0]` field (instruction bits 7-11).
const S_IMM_4_0_MASK: u32 = 0x0000_0F80;

/// Left shift moving `imm[4:0]` from bits 7-11 to accumulator bits 20-24.
const S_IMM_4_0_ALIGN: u32 = 13;

/// Arithmetic shift bringing the S-Type accumulator down to a 12-bit value.
const S_IMM_SHIFT: u32 = 20;

/// Mask of the B-Type `imm[12]` sign bit (instruction bit 31).
///
/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
const B_IMM_12_MASK: u32 = 0x8000_0000;

/// Mask of the B-Type `imm[11]` bit (instruction bit 7).
const B_IMM_11_MASK: u32 = 0x0000_0080;

/// Left shift moving `imm[11]` from bit 7 to accumulator bit 30.
const B_IMM_11_ALIGN: u32 = 23;

/// Mask of the B-Type `imm[10:5]` field (instruction bits 25-30).
const B_IMM_10_5_MASK: u32 = 0x7E00_0000;

/// Right shift moving `imm[10:5]` from bits 25-30 to accumulator bits 24-29.
const B_IMM_10_5_ALIGN: u32 = 1;

/// Mask of the B-Type `imm[4:1]` field (instruction bits 8-11).
const B_IMM_4_1_MASK: u32 = 0x0000_0F00;

/// Left shift moving `imm[4:1]` from bits 8-11 to accumulator bits 20-23.
const B_IMM_4_1_ALIGN: u32 = 12;

/// Arithmetic shift bringing the B-Type accumulator down to a 13-bit offset.
const B_IMM_SHIFT: u32 = 19;

/// Mask of the U-Type immediate (bits 12-31), kept in place.
///
/// U-Type format: `imm[31:12] | rd | opcode`
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Mask of the J-Type `imm[20]` sign bit (instruction bit 31).
///
/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`
const J_IMM_20_MASK: u32 = 0x8000_0000;

/// Mask of the J-Type `imm[19:12]` field (instruction bits 12-19).
const J_IMM_19_12_MASK: u32 = 0x000F_F000;

/// Left shift moving `imm[19:12]` from bits 12-19 to accumulator bits 23-30.
const J_IMM_19_12_ALIGN: u32 = 11;

/// Mask of the J-Type `imm[11]` bit (instruction bit 20).
const J_IMM_11_MASK: u32 = 0x0010_0000;

/// Left shift moving `imm[11]` from bit 20 to accumulator bit 22.
const J_IMM_11_ALIGN: u32 = 2;

/// Mask of the J-Type `imm[10:1]` field (instruction bits 21-30).
const J_IMM_10_1_MASK: u32 = 0x7FE0_0000;

/// Right shift moving `imm[10:1]` from bits 21-30 to accumulator bits 12-21.
const J_IMM_10_1_ALIGN: u32 = 9;

/// Arithmetic shift bringing the J-Type accumulator down to a 21-bit offset.
const J_IMM_SHIFT: u32 = 11;

/// Decodes a RISC-V instruction into its component fields.
///
/// The immediate is chosen by the major opcode; formats without an
/// immediate (R, R4, SYSTEM) report zero.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding to decode
///
/// # Returns
///
/// A `Decoded` structure containing all extracted instruction fields.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();

    let imm = match opcode {
        opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR | fp_opcodes::OP_LOAD_FP => {
            imm_i(inst)
        }
        opcodes::OP_STORE | fp_opcodes::OP_STORE_FP => imm_s(inst),
        opcodes::OP_BRANCH => imm_b(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => imm_u(inst) as i32,
        opcodes::OP_JAL => imm_j(inst),
        _ => 0,
    };

    Decoded {
        raw: inst,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        imm,
    }
}

/// Decodes the I-Type immediate.
///
/// Used for loads, JALR, and immediate arithmetic. The 12-bit field already
/// sits at the top of the word, so one arithmetic shift sign-extends it.
#[inline(always)]
pub const fn imm_i(inst: u32) -> i32 {
    (inst as i32) >> I_IMM_SHIFT
}

/// Decodes the S-Type immediate used by stores.
#[inline(always)]
pub const fn imm_s(inst: u32) -> i32 {
    let acc = (inst & S_IMM_11_5_MASK) | ((inst & S_IMM_4_0_MASK) << S_IMM_4_0_ALIGN);
    (acc as i32) >> S_IMM_SHIFT
}

/// Decodes the B-Type immediate used by conditional branches.
///
/// The result is an even byte offset in `[-4096, 4094]`.
#[inline(always)]
pub const fn imm_b(inst: u32) -> i32 {
    let acc = (inst & B_IMM_12_MASK)
        | ((inst & B_IMM_11_MASK) << B_IMM_11_ALIGN)
        | ((inst & B_IMM_10_5_MASK) >> B_IMM_10_5_ALIGN)
        | ((inst & B_IMM_4_1_MASK) << B_IMM_4_1_ALIGN);
    (acc as i32) >> B_IMM_SHIFT
}

/// Decodes the U-Type immediate used by LUI and AUIPC.
///
/// The value is returned pre-shifted (low 12 bits zero) so it can be added
/// to a register or the PC directly.
#[inline(always)]
pub const fn imm_u(inst: u32) -> u32 {
    inst & U_IMM_MASK
}

/// Decodes the J-Type immediate used by JAL.
///
/// The result is an even byte offset in `[-1 MiB, 1 MiB - 2]`.
#[inline(always)]
pub const fn imm_j(inst: u32) -> i32 {
    let acc = (inst & J_IMM_20_MASK)
        | ((inst & J_IMM_19_12_MASK) << J_IMM_19_12_ALIGN)
        | ((inst & J_IMM_11_MASK) << J_IMM_11_ALIGN)
        | ((inst & J_IMM_10_1_MASK) >> J_IMM_10_1_ALIGN);
    (acc as i32) >> J_IMM_SHIFT
}

/// Decodes the CSR address of a SYSTEM instruction.
///
/// Same bit positions as the I-Type immediate but zero-extended, since it
/// names a register rather than a number.
#[inline(always)]
pub const fn csr(inst: u32) -> u32 {
    inst >> I_IMM_SHIFT
}

/// Sign-extends the low byte of `value` to a full word (LB).
#[inline(always)]
pub const fn sign_extend_b(value: u32) -> u32 {
    value as u8 as i8 as i32 as u32
}

/// Sign-extends the low halfword of `value` to a full word (LH).
#[inline(always)]
pub const fn sign_extend_h(value: u32) -> u32 {
    value as u16 as i16 as i32 as u32
}
