//! `RoundingMode` and BigDec rounding / quantization.
//!
//! All seven modes collapse to the same shape: truncate to the target
//! width, then look at the cut digit (and, for `HalfEven`, the parity of
//! the kept digit; for `Ceiling`/`Floor`, the sign) to decide whether to
//! increment the truncated coefficient by one.

use crate::error::{BigError, BigResult};
use crate::ubig10::UBig10;

use super::BigDec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    HalfEven,
    HalfUp,
    HalfDown,
    Up,
    Down,
    Ceiling,
    Floor,
}

impl Default for RoundingMode {
    fn default() -> Self {
        RoundingMode::HalfEven
    }
}

/// Rounds `value` to `precision` significant decimal digits.
pub(crate) fn round_to_precision(value: &BigDec, precision: u32, mode: RoundingMode) -> BigResult<BigDec> {
    if precision == 0 {
        return Err(BigError::precision("BigDec::round", "precision must be > 0"));
    }
    if value.is_zero() {
        return Ok(value.clone());
    }
    let current_digits = value.coefficient.significant_digits();
    if current_digits <= precision as usize {
        return Ok(value.clone());
    }
    let drop = current_digits - precision as usize;
    Ok(truncate_and_round(value, drop, mode))
}

/// Rescales to an exact target `scale`. Raising the scale multiplies by a
/// power of ten (exact, no rounding needed); lowering it truncates and
/// rounds exactly like `round`, but the rounding point is driven by `scale`
/// instead of a significant-digit count.
pub(crate) fn quantize(value: &BigDec, scale: i64, mode: RoundingMode) -> BigResult<BigDec> {
    if value.is_zero() {
        return Ok(BigDec::new(false, UBig10::zero(), scale));
    }
    if scale >= value.scale {
        let k = (scale - value.scale) as u64;
        let coeff = value.coefficient.multiply_by_power_of_ten(k);
        return Ok(BigDec::new(value.sign, coeff, scale));
    }
    let drop = (value.scale - scale) as usize;
    if drop >= value.coefficient.significant_digits() {
        // every significant digit falls below the target scale
        let rounded = truncate_and_round_to_zero_digits(value, drop, mode);
        return Ok(BigDec::new(rounded.sign, rounded.coefficient, scale));
    }
    Ok(truncate_and_round(value, drop, mode))
}

/// Drops the low `drop` decimal digits of `value.coefficient`, then applies
/// `mode` to decide whether to add one to the kept digits. Scale shrinks by
/// `drop` (the dropped digits become part of the exponent).
fn truncate_and_round(value: &BigDec, drop: usize, mode: RoundingMode) -> BigDec {
    let digits = value.coefficient.to_decimal_string();
    let keep_len = digits.len() - drop;
    let (kept, cut) = digits.split_at(keep_len);
    let mut kept_value = if kept.is_empty() {
        UBig10::zero()
    } else {
        UBig10::from_decimal_str(kept).unwrap()
    };

    let mut scale = value.scale - drop as i64;
    if should_round_up(&kept_value, cut, value.sign, mode) {
        kept_value.add_inplace(&UBig10::one());
        if kept_value.significant_digits() > keep_len {
            // A trailing-9s carry (e.g. 99 -> 100) always overflows to
            // exactly one extra digit and the overflowed value is always an
            // exact power of ten; drop that digit and fold it into the
            // scale instead of leaving an oversized coefficient behind.
            let (shrunk, _) = kept_value.floor_divide_by_u32(10).unwrap();
            kept_value = shrunk;
            scale -= 1;
        }
    }

    BigDec::new(value.sign, kept_value, scale)
}

/// Special case for `quantize`/`round` where every significant digit is
/// dropped: the kept coefficient is conceptually `0`, but `Up` must still
/// produce `1`, matching the corrected behavior of the reference
/// decimal implementation this mirrors rather than a naive zero.
fn truncate_and_round_to_zero_digits(value: &BigDec, drop: usize, mode: RoundingMode) -> BigDec {
    let digits = value.coefficient.to_decimal_string();
    let padded = format!("{}{}", "0".repeat(drop - digits.len()), digits);
    let cut = &padded[..drop];
    if should_round_up(&UBig10::zero(), cut, value.sign, mode) {
        BigDec::new(value.sign, UBig10::one(), value.scale - drop as i64)
    } else {
        BigDec::new(false, UBig10::zero(), value.scale - drop as i64)
    }
}

/// Decides whether to increment `kept` by one, given the cut-off digits
/// `cut` (most significant first) and the value's sign.
fn should_round_up(kept: &UBig10, cut: &str, negative: bool, mode: RoundingMode) -> bool {
    if cut.is_empty() || cut.bytes().all(|b| b == b'0') {
        return false;
    }
    let first_cut = cut.as_bytes()[0] - b'0';
    let rest_nonzero = cut.bytes().skip(1).any(|b| b != b'0');

    match mode {
        RoundingMode::Down => false,
        RoundingMode::Up => true,
        RoundingMode::Ceiling => !negative,
        RoundingMode::Floor => negative,
        RoundingMode::HalfUp => first_cut >= 5,
        RoundingMode::HalfDown => first_cut > 5 || (first_cut == 5 && rest_nonzero),
        RoundingMode::HalfEven => {
            if first_cut > 5 || (first_cut == 5 && rest_nonzero) {
                true
            } else if first_cut < 5 {
                false
            } else {
                // exactly half: round to even
                let kept_is_odd = kept
                    .to_decimal_string()
                    .bytes()
                    .last()
                    .map(|b| (b - b'0') % 2 == 1)
                    .unwrap_or(false);
                kept_is_odd
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigdec::BigDec;

    fn d(s: &str) -> BigDec {
        BigDec::from_str_radix10(s).unwrap()
    }

    #[test]
    fn half_even_rounds_to_even_neighbor() {
        assert_eq!(d("2.5").round(1, RoundingMode::HalfEven).unwrap().to_string_cpython(), "2");
        assert_eq!(d("3.5").round(1, RoundingMode::HalfEven).unwrap().to_string_cpython(), "4");
    }

    #[test]
    fn half_up_always_rounds_away_from_zero_on_tie() {
        assert_eq!(d("2.5").round(1, RoundingMode::HalfUp).unwrap().to_string_cpython(), "3");
    }

    #[test]
    fn up_mode_on_minus_0_9_to_zero_places_yields_minus_1() {
        let got = d("-0.9").quantize(0, RoundingMode::Up).unwrap();
        assert_eq!(got.to_string_cpython(), "-1");
    }

    #[test]
    fn up_mode_stripping_all_digits_yields_one_times_ten_to_scale() {
        let v = d("0.001");
        let got = v.quantize(0, RoundingMode::Up).unwrap();
        assert_eq!(got.to_string_cpython(), "1");
        assert!(!got.is_negative());
    }

    #[test]
    fn down_mode_truncates_toward_zero() {
        assert_eq!(d("2.9").round(1, RoundingMode::Down).unwrap().to_string_cpython(), "2");
        assert_eq!(d("-2.9").round(1, RoundingMode::Down).unwrap().to_string_cpython(), "-2");
    }

    #[test]
    fn quantize_raises_scale_exactly() {
        let v = d("1.5");
        let got = v.quantize(3, RoundingMode::HalfEven).unwrap();
        assert_eq!(got.to_string_cpython(), "1.500");
    }

    #[test]
    fn half_up_carry_through_trailing_nines_renormalizes_digit_count() {
        let got = d("9.99").round(2, RoundingMode::HalfUp).unwrap();
        assert_eq!(got.to_string_cpython(), "10");
        assert_eq!(got.coefficient().significant_digits(), 2);
    }

    #[test]
    fn quantize_carry_through_trailing_nines_renormalizes_digit_count() {
        let got = d("99.9").quantize(0, RoundingMode::HalfUp).unwrap();
        assert_eq!(got.to_string_cpython(), "100");
    }
}
