//! Truncating scalar division: the single most important algorithmic
//! decision in `BigDec` — it turns the asymmetric-divisor case into
//! bounded work instead of a quadratic blow-up, by truncating both
//! operands to roughly `precision` words before running `UBig10`'s long
//! division, then detecting (and exploiting) exact results.

use std::cmp::Ordering;

use crate::error::{BigError, BigResult};
use crate::limits::{DIGITS_PER_WORD, TRUNCATION_GUARD};
use crate::ubig10::UBig10;

use super::round::RoundingMode;
use super::BigDec;

/// Sum-typed quotient+remainder pair: no out-parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivMod {
    pub quotient: BigDec,
    pub remainder: BigDec,
}

pub(crate) fn truncating_div(a: &BigDec, b: &BigDec, precision: u32) -> BigResult<BigDec> {
    if b.is_zero() {
        return Err(BigError::division_by_zero("BigDec::div"));
    }
    if precision == 0 {
        return Err(BigError::precision("BigDec::div", "precision must be > 0"));
    }
    if a.is_zero() {
        return Ok(BigDec::zero());
    }

    let needed_divisor_words = (precision as usize).div_ceil(DIGITS_PER_WORD) + 2;

    // Step 3: truncate the divisor's low words if it has far more words
    // than the computation needs.
    let (divisor_words_used, dropped_divisor_words) = if b.coefficient.word_len() > needed_divisor_words + TRUNCATION_GUARD {
        let dropped = b.coefficient.word_len() - (needed_divisor_words + TRUNCATION_GUARD);
        (b.coefficient.floor_divide_by_power_of_billion(dropped), dropped)
    } else {
        (b.coefficient.clone(), 0)
    };

    // Step 1-2: scale the dividend so the division has enough working
    // digits relative to the (possibly truncated) divisor.
    let diff_n_words = a.coefficient.word_len() as i64 - divisor_words_used.word_len() as i64;
    let extra_words = needed_divisor_words as i64 - diff_n_words;

    let (dividend_used, exact_check_possible) = if extra_words >= 0 {
        (a.coefficient.multiply_by_power_of_ten(9 * extra_words as u64), dropped_divisor_words == 0)
    } else {
        (a.coefficient.floor_divide_by_power_of_billion((-extra_words) as usize), false)
    };

    let dr = dividend_used.div_rem(&divisor_words_used)?;

    let raw_scale = 9 * extra_words + 9 * dropped_divisor_words as i64 + a.scale - b.scale;
    let sign = a.sign ^ b.sign;
    let raw = BigDec::new(sign, dr.quotient, raw_scale);

    let rounded = super::round::round_to_precision(&raw, precision, RoundingMode::HalfEven)?;

    if exact_check_possible {
        if let Some(exact) = try_strip_exact(&rounded, a, b) {
            return Ok(exact);
        }
    }
    Ok(rounded)
}

/// If `candidate` (with trailing zero digits stripped one at a time) times
/// `b` recovers `a` exactly, returns the stripped form — the
/// exact-division post-check, e.g. `10/5 == 2`, not `2.000...0`.
fn try_strip_exact(candidate: &BigDec, a: &BigDec, b: &BigDec) -> Option<BigDec> {
    let digits = candidate.coefficient.to_decimal_string();
    let trailing_zeros = digits.bytes().rev().take_while(|&b| b == b'0').count();
    if trailing_zeros == 0 {
        if candidate.mul(b) == *a {
            return Some(candidate.clone());
        }
        return None;
    }
    let mut best = None;
    for strip in 1..=trailing_zeros {
        let new_len = digits.len() - strip;
        let stripped_digits = &digits[..new_len];
        let stripped = if stripped_digits.is_empty() { "0" } else { stripped_digits };
        let coeff = UBig10::from_decimal_str(stripped).ok()?;
        let attempt = BigDec::new(candidate.sign, coeff, candidate.scale - strip as i64);
        if attempt.mul(b) == *a {
            best = Some(attempt);
        } else {
            break;
        }
    }
    best
}

/// Division by a native `u32` scalar: wraps `UBig10::floor_divide_by_u32`
/// and rescales, with no `BigDec` allocation for the divisor. The dedicated
/// fast path used by every transcendental inner loop.
pub(crate) fn true_divide_inexact_by_u32(a: &BigDec, d: u32, precision: u32) -> BigResult<BigDec> {
    if d == 0 {
        return Err(BigError::division_by_zero("BigDec::true_divide_inexact_by_u32"));
    }
    if a.is_zero() {
        return Ok(BigDec::zero());
    }
    let needed_words = (precision as usize).div_ceil(DIGITS_PER_WORD) + 2;
    let extra_words = needed_words as i64 - a.coefficient.word_len() as i64;
    let scaled = if extra_words >= 0 {
        a.coefficient.multiply_by_power_of_ten(9 * extra_words as u64)
    } else {
        a.coefficient.floor_divide_by_power_of_billion((-extra_words) as usize)
    };
    let (q, _) = scaled.floor_divide_by_u32(d)?;
    let scale = 9 * extra_words + a.scale;
    let raw = BigDec::new(a.sign, q, scale);
    super::round::round_to_precision(&raw, precision, RoundingMode::HalfEven)
}

/// Floor division + floor-mod (`a == (a//b)*b + (a%b)`, remainder's sign
/// follows the divisor).
pub(crate) fn divmod(a: &BigDec, b: &BigDec, precision: u32) -> BigResult<DivMod> {
    if b.is_zero() {
        return Err(BigError::division_by_zero("BigDec::divmod"));
    }
    if a.is_zero() {
        return Ok(DivMod {
            quotient: BigDec::zero(),
            remainder: BigDec::zero(),
        });
    }

    let raw_quotient = truncating_div(a, b, precision.max(1))?;
    let mut q = truncate_to_integer(&raw_quotient);

    let mut remainder = a.sub(&q.mul(b));
    // floor-mod convention: remainder takes the divisor's sign.
    if !remainder.is_zero() && remainder.is_negative() != b.is_negative() {
        q = q.sub(&BigDec::one());
        remainder = a.sub(&q.mul(b));
    }
    Ok(DivMod { quotient: q, remainder })
}

/// Truncates `value` to an exact integer (`scale == 0`) by dropping any
/// fractional digits (toward zero).
fn truncate_to_integer(value: &BigDec) -> BigDec {
    if value.scale <= 0 {
        return value.clone();
    }
    let drop = value.scale as usize;
    let digits = value.coefficient.to_decimal_string();
    if drop >= digits.len() {
        return BigDec::new(false, UBig10::zero(), 0);
    }
    let kept = &digits[..digits.len() - drop];
    let coeff = UBig10::from_decimal_str(kept).unwrap();
    BigDec::new(value.sign, coeff, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigdec::BigDec;

    fn d(s: &str) -> BigDec {
        BigDec::from_str_radix10(s).unwrap()
    }

    #[test]
    fn exact_division_strips_trailing_zeros() {
        let got = d("10").div(&d("5"), 50).unwrap();
        assert_eq!(got.to_string_cpython(), "2");
    }

    #[test]
    fn large_integer_divided_by_one_is_identity() {
        let a = d("79228162514264337593543950335");
        let got = a.div(&d("1"), 50).unwrap();
        assert_eq!(got.to_string_cpython(), "79228162514264337593543950335");
    }

    #[test]
    fn one_third_matches_expected_digits() {
        let got = d("1").div(&d("3"), 50).unwrap();
        assert_eq!(got.to_string_cpython(), "0.33333333333333333333333333333333333333333333333333");
    }

    #[test]
    fn division_by_zero_errors() {
        assert!(d("1").div(&BigDec::zero(), 10).is_err());
    }

    #[test]
    fn floor_div_and_mod_recover_dividend() {
        let a = d("10.5");
        let b = d("3.2");
        let dm = a.divmod(&b, 30).unwrap();
        assert_eq!(dm.quotient, d("3"));
        assert_eq!(dm.remainder, d("0.9"));
        let recovered = dm.quotient.mul(&b).add(&dm.remainder);
        assert_eq!(recovered, a);
    }

    #[test]
    fn floor_mod_takes_divisor_sign() {
        let a = d("-7");
        let b = d("2");
        let dm = a.divmod(&b, 30).unwrap();
        assert_eq!(dm.quotient, d("-4"));
        assert_eq!(dm.remainder, d("1"));
    }
}
