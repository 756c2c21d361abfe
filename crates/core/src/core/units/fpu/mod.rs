//! Floating-Point Unit (FPU) classification.
//!
//! This module implements `FCLASS.S`: the IEEE 754 category of a raw
//! single-precision bit pattern, reported as a 10-bit mask with exactly
//! one bit set.

/// Bit mask for the sign bit in a 32-bit IEEE 754 float (bit 31).
const F32_SIGN_BIT: u32 = 0x8000_0000;

/// Bit mask for the biased exponent of a 32-bit float (bits 23-30).
const F32_EXP_MASK: u32 = 0x7F80_0000;

/// Bit mask for the fraction of a 32-bit float (bits 0-22).
const F32_FRAC_MASK: u32 = 0x007F_FFFF;

/// Most significant fraction bit; set for quiet NaNs.
const F32_QUIET_BIT: u32 = 0x0040_0000;

/// Negative infinity.
pub const FCLASS_NEG_INF: u32 = 1 << 0;
/// Negative normal number.
pub const FCLASS_NEG_NORMAL: u32 = 1 << 1;
/// Negative subnormal number.
pub const FCLASS_NEG_SUBNORMAL: u32 = 1 << 2;
/// Negative zero.
pub const FCLASS_NEG_ZERO: u32 = 1 << 3;
/// Positive zero.
pub const FCLASS_POS_ZERO: u32 = 1 << 4;
/// Positive subnormal number.
pub const FCLASS_POS_SUBNORMAL: u32 = 1 << 5;
/// Positive normal number.
pub const FCLASS_POS_NORMAL: u32 = 1 << 6;
/// Positive infinity.
pub const FCLASS_POS_INF: u32 = 1 << 7;
/// Signaling NaN.
pub const FCLASS_SNAN: u32 = 1 << 8;
/// Quiet NaN.
pub const FCLASS_QNAN: u32 = 1 << 9;

/// Classifies a single-precision bit pattern.
///
/// # Arguments
///
/// * `bits` - The raw IEEE 754 single-precision encoding.
///
/// # Returns
///
/// One of the `FCLASS_*` masks. NaNs are classified without regard to sign.
pub const fn calc_fclass(bits: u32) -> u32 {
    let negative = bits & F32_SIGN_BIT != 0;
    let exp = bits & F32_EXP_MASK;
    let frac = bits & F32_FRAC_MASK;

    match (exp, frac) {
        (F32_EXP_MASK, 0) => {
            if negative {
                FCLASS_NEG_INF
            } else {
                FCLASS_POS_INF
            }
        }
        (F32_EXP_MASK, _) => {
            if frac & F32_QUIET_BIT != 0 {
                FCLASS_QNAN
            } else {
                FCLASS_SNAN
            }
        }
        (0, 0) => {
            if negative {
                FCLASS_NEG_ZERO
            } else {
                FCLASS_POS_ZERO
            }
        }
        (0, _) => {
            if negative {
                FCLASS_NEG_SUBNORMAL
            } else {
                FCLASS_POS_SUBNORMAL
            }
        }
        _ => {
            if negative {
                FCLASS_NEG_NORMAL
            } else {
                FCLASS_POS_NORMAL
            }
        }
    }
}
