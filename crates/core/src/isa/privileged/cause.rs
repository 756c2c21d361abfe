//! `mcause` values.
//!
//! Only the synchronous exceptions this core raises are listed. Interrupts
//! are not modelled, so bit 31 of `mcause` is always clear.

/// Exception codes.
pub mod exception {
    /// Jump or branch to an address that is not 4-byte aligned. `mtval` holds the target.
    pub const INSTRUCTION_ADDRESS_MISALIGNED: u32 = 0;
    /// Reserved or unimplemented encoding. `mtval` is 0.
    pub const ILLEGAL_INSTRUCTION: u32 = 2;
    /// Misaligned load. `mtval` holds the effective address.
    pub const LOAD_ADDRESS_MISALIGNED: u32 = 4;
    /// Misaligned store or AMO. `mtval` holds the effective address.
    pub const STORE_ADDRESS_MISALIGNED: u32 = 6;
}
