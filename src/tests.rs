//! Crate-wide property tests using quickcheck: UBig10/SBig2 arithmetic
//! checked against native `u128`/`i128`, and algebraic laws for BigDec.

use quickcheck_macros::quickcheck;

use crate::{BigDec, SBig2, UBig10};

// ============================================================================
// UBig10 vs native u128
// ============================================================================

#[quickcheck]
fn ubig10_roundtrip(v: u64) -> bool {
    UBig10::from_u64(v).to_decimal_string() == v.to_string()
}

#[quickcheck]
fn ubig10_add_matches_native(a: u64, b: u64) -> bool {
    let expected = a as u128 + b as u128;
    let got = UBig10::from_u64(a).add(&UBig10::from_u64(b));
    got.to_decimal_string() == expected.to_string()
}

#[quickcheck]
fn ubig10_mul_matches_native(a: u64, b: u32) -> bool {
    let expected = a as u128 * b as u128;
    let got = UBig10::from_u64(a).mul(&UBig10::from_u64(b as u64));
    got.to_decimal_string() == expected.to_string()
}

#[quickcheck]
fn ubig10_div_rem_matches_native(a: u64, b: u64) -> bool {
    if b == 0 {
        return true;
    }
    let got = UBig10::from_u64(a).div_rem(&UBig10::from_u64(b)).unwrap();
    got.quotient.to_decimal_string() == (a / b).to_string() && got.remainder.to_decimal_string() == (a % b).to_string()
}

#[quickcheck]
fn ubig10_isqrt_floors_correctly(v: u64) -> bool {
    let root = UBig10::from_u64(v).isqrt();
    let r: u64 = root.to_decimal_string().parse().unwrap();
    r * r <= v && (r + 1).checked_mul(r + 1).map(|sq| sq > v).unwrap_or(true)
}

// ============================================================================
// SBig2 vs native i64
// ============================================================================

#[quickcheck]
fn sbig2_roundtrip(v: i64) -> bool {
    SBig2::from_i64(v).to_decimal_string() == v.to_string()
}

#[quickcheck]
fn sbig2_add_matches_native(a: i32, b: i32) -> bool {
    let expected = a as i64 + b as i64;
    let got = SBig2::from_i64(a as i64).add(&SBig2::from_i64(b as i64));
    got.to_decimal_string() == expected.to_string()
}

#[quickcheck]
fn sbig2_mul_matches_native(a: i32, b: i32) -> bool {
    let expected = a as i64 * b as i64;
    let got = SBig2::from_i64(a as i64).mul(&SBig2::from_i64(b as i64));
    got.to_decimal_string() == expected.to_string()
}

#[quickcheck]
fn sbig2_div_rem_matches_native(a: i64, b: i64) -> bool {
    if b == 0 || (a == i64::MIN && b == -1) {
        return true;
    }
    let got = SBig2::from_i64(a).div_rem(&SBig2::from_i64(b)).unwrap();
    got.quotient.to_decimal_string() == (a / b).to_string() && got.remainder.to_decimal_string() == (a % b).to_string()
}

#[quickcheck]
fn sbig2_bitwise_matches_native_i64(a: i64, b: i64) -> bool {
    let sa = SBig2::from_i64(a);
    let sb = SBig2::from_i64(b);
    sa.bitand(&sb).to_decimal_string() == (a & b).to_string()
        && sa.bitor(&sb).to_decimal_string() == (a | b).to_string()
        && sa.bitxor(&sb).to_decimal_string() == (a ^ b).to_string()
        && sa.not().to_decimal_string() == (!a).to_string()
}

// ============================================================================
// BigDec algebraic laws
// ============================================================================

#[quickcheck]
fn bigdec_mul_is_commutative(a: i64, b: i64) -> bool {
    let x = BigDec::from_i64(a);
    let y = BigDec::from_i64(b);
    x.mul(&y) == y.mul(&x)
}

#[quickcheck]
fn bigdec_add_then_neg_is_zero(a: i64) -> bool {
    let x = BigDec::from_i64(a);
    x.add(&x.neg()).is_zero()
}

#[quickcheck]
fn bigdec_string_round_trip(a: i64, frac: u16) -> bool {
    let s = format!("{}.{}", a, frac % 10000);
    let parsed = match BigDec::from_str_radix10(&s) {
        Ok(p) => p,
        Err(_) => return true,
    };
    let formatted = parsed.to_string_cpython();
    BigDec::from_str_radix10(&formatted).unwrap() == parsed
}
