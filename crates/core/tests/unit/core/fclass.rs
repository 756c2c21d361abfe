//! FCLASS.S classification tests.
//!
//! Checks one canonical encoding per class, the boundaries between
//! subnormal, normal, and infinite exponents, and that every bit pattern
//! lands in exactly one class.

use proptest::prelude::*;
use rstest::rstest;
use rv32jit_core::core::units::fpu::*;

#[rstest]
#[case::neg_inf(0xFF80_0000, FCLASS_NEG_INF)]
#[case::neg_normal(0xBF80_0000, FCLASS_NEG_NORMAL)]
#[case::neg_subnormal(0x8000_0001, FCLASS_NEG_SUBNORMAL)]
#[case::neg_zero(0x8000_0000, FCLASS_NEG_ZERO)]
#[case::pos_zero(0x0000_0000, FCLASS_POS_ZERO)]
#[case::pos_subnormal(0x0000_0001, FCLASS_POS_SUBNORMAL)]
#[case::pos_normal(0x3F80_0000, FCLASS_POS_NORMAL)]
#[case::pos_inf(0x7F80_0000, FCLASS_POS_INF)]
#[case::snan(0x7F80_0001, FCLASS_SNAN)]
#[case::qnan(0x7FC0_0000, FCLASS_QNAN)]
fn canonical_values(#[case] bits: u32, #[case] class: u32) {
    assert_eq!(calc_fclass(bits), class);
}

#[rstest]
#[case::largest_subnormal(0x007F_FFFF, FCLASS_POS_SUBNORMAL)]
#[case::smallest_normal(0x0080_0000, FCLASS_POS_NORMAL)]
#[case::largest_normal(0x7F7F_FFFF, FCLASS_POS_NORMAL)]
#[case::neg_largest_subnormal(0x807F_FFFF, FCLASS_NEG_SUBNORMAL)]
#[case::neg_largest_normal(0xFF7F_FFFF, FCLASS_NEG_NORMAL)]
#[case::snan_all_low_bits(0x7FBF_FFFF, FCLASS_SNAN)]
#[case::negative_snan(0xFF80_0001, FCLASS_SNAN)]
#[case::negative_qnan(0xFFC0_0000, FCLASS_QNAN)]
#[case::qnan_payload(0x7FFF_FFFF, FCLASS_QNAN)]
fn exponent_and_fraction_boundaries(#[case] bits: u32, #[case] class: u32) {
    assert_eq!(calc_fclass(bits), class);
}

#[test]
fn matches_host_float_categories() {
    assert_eq!(calc_fclass(f32::MIN_POSITIVE.to_bits()), FCLASS_POS_NORMAL);
    assert_eq!(calc_fclass((-f32::MAX).to_bits()), FCLASS_NEG_NORMAL);
    assert_eq!(calc_fclass(f32::NEG_INFINITY.to_bits()), FCLASS_NEG_INF);
    assert_eq!(calc_fclass(f32::NAN.to_bits()), FCLASS_QNAN);
    assert_eq!(calc_fclass((-0.0_f32).to_bits()), FCLASS_NEG_ZERO);
}

proptest! {
    #[test]
    fn exactly_one_class_bit(bits in any::<u32>()) {
        let class = calc_fclass(bits);
        prop_assert_eq!(class.count_ones(), 1);
        prop_assert!(class < 1 << 10);
    }

    #[test]
    fn agrees_with_host_classification(bits in any::<u32>()) {
        use std::num::FpCategory;

        let value = f32::from_bits(bits);
        let negative = value.is_sign_negative();
        let expected = match value.classify() {
            FpCategory::Nan => {
                if bits & 0x0040_0000 != 0 { FCLASS_QNAN } else { FCLASS_SNAN }
            }
            FpCategory::Infinite => if negative { FCLASS_NEG_INF } else { FCLASS_POS_INF },
            FpCategory::Zero => if negative { FCLASS_NEG_ZERO } else { FCLASS_POS_ZERO },
            FpCategory::Subnormal => {
                if negative { FCLASS_NEG_SUBNORMAL } else { FCLASS_POS_SUBNORMAL }
            }
            FpCategory::Normal => if negative { FCLASS_NEG_NORMAL } else { FCLASS_POS_NORMAL },
        };
        prop_assert_eq!(calc_fclass(bits), expected);
    }
}
