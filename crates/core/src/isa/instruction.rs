//! Field extraction for 32-bit instruction words.
//!
//! Every RV32 format keeps `opcode`, `rd`, `funct3`, `rs1` and `rs2` at the
//! same bit positions; formats differ only in which of those fields are
//! replaced by immediate bits. The accessors below therefore work on any
//! word, and it is up to the caller to read only the fields its format has.
//!
//! ```text
//!  31    27 26 25 24   20 19   15 14  12 11    7 6      0
//! | rs3    | fmt | rs2   | rs1   |funct3| rd    | opcode |
//! |     funct7   |
//! |          csr         |
//! ```

/// Width of a register index field.
const REG_BITS: u32 = 5;

/// Extracts `width` bits of `word` starting at bit `lo`.
#[inline(always)]
pub const fn bits(word: u32, lo: u32, width: u32) -> u32 {
    (word >> lo) & ((1 << width) - 1)
}

/// Field accessors for a raw instruction word.
pub trait InstructionBits {
    /// Bits 6-0.
    fn opcode(&self) -> u32;

    /// Bits 6-2: the major opcode with the always-set `11` suffix dropped.
    fn opcode_6_2(&self) -> u32;

    /// Destination register, bits 11-7.
    fn rd(&self) -> usize;

    /// First source register, bits 19-15. Also the `uimm` of immediate CSR forms.
    fn rs1(&self) -> usize;

    /// Second source register, bits 24-20.
    fn rs2(&self) -> usize;

    /// Third source register of fused multiply-add, bits 31-27.
    fn rs3(&self) -> usize;

    /// Bits 14-12.
    fn funct3(&self) -> u32;

    /// Bits 31-25.
    fn funct7(&self) -> u32;

    /// Precision of an R4-type instruction, bits 26-25 (0 is single).
    fn fmt(&self) -> u32;

    /// CSR number, bits 31-20. Never sign-extended.
    fn csr(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        bits(*self, 0, 7)
    }

    #[inline(always)]
    fn opcode_6_2(&self) -> u32 {
        bits(*self, 2, 5)
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        bits(*self, 7, REG_BITS) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        bits(*self, 15, REG_BITS) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        bits(*self, 20, REG_BITS) as usize
    }

    #[inline(always)]
    fn rs3(&self) -> usize {
        bits(*self, 27, REG_BITS) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        bits(*self, 12, 3)
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        bits(*self, 25, 7)
    }

    #[inline(always)]
    fn fmt(&self) -> u32 {
        bits(*self, 25, 2)
    }

    #[inline(always)]
    fn csr(&self) -> u32 {
        bits(*self, 20, 12)
    }
}

/// An instruction word split into its fields.
///
/// `imm` holds the immediate of whatever format the major opcode implies,
/// already sign-extended. U-type immediates keep their low 12 zero bits;
/// formats without an immediate store 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// The undecoded word.
    pub raw: u32,
    /// Bits 6-0.
    pub opcode: u32,
    /// Destination register.
    pub rd: usize,
    /// First source register.
    pub rs1: usize,
    /// Second source register.
    pub rs2: usize,
    /// Bits 14-12.
    pub funct3: u32,
    /// Bits 31-25.
    pub funct7: u32,
    /// Format-selected immediate.
    pub imm: i32,
}
