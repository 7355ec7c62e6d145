//! SBig2 <-> decimal bridge, routed through `UBig10`'s base-10 magnitude:
//! SBig2's own radix is base 2^32, so decimal I/O always round-trips
//! through UBig10's magnitude converter.

use super::div::floor_divide_by_u32_words;
use super::mul::multiply_by_word;
use super::{trim, SBig2};
use crate::error::{BigError, BigResult};
use crate::limits::B10;
use crate::ubig10::UBig10;

/// Horner's method in radix-2^32: `acc = acc*B10 + word`, processing
/// `UBig10`'s decimal words from most to least significant.
pub(crate) fn from_ubig10(value: &UBig10) -> SBig2 {
    let mut words: Vec<u32> = vec![0];
    for &w in value.words().iter().rev() {
        words = multiply_by_word(&words, B10);
        words = super::add_words(&words, &[w]);
    }
    trim(&mut words);
    SBig2 { sign: false, words }
}

/// Repeated `floor_divide_by_u32(B10)`, emitting base-`10^9` remainder
/// chunks least-significant first, then handing them to
/// `UBig10::from_words` (already in the right radix).
pub(crate) fn to_ubig10(value: &SBig2) -> UBig10 {
    let mut cur = value.words.clone();
    trim(&mut cur);
    let mut chunks: Vec<u32> = Vec::new();
    loop {
        let (q, r) = floor_divide_by_u32_words(&cur, B10);
        chunks.push(r);
        if q.len() == 1 && q[0] == 0 {
            break;
        }
        cur = q;
    }
    UBig10::from_words(chunks)
}

pub(crate) fn from_decimal_str(s: &str) -> BigResult<SBig2> {
    let op = "SBig2::from_decimal_str";
    let s = s.trim();
    if s.is_empty() {
        return Err(BigError::conversion(op, s, "empty input"));
    }
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BigError::conversion(op, s, "expected an optionally-signed integer"));
    }
    let magnitude = UBig10::from_decimal_str(digits)?;
    Ok(SBig2::from_words(negative, from_ubig10(&magnitude).words))
}

pub(crate) fn to_decimal_string(value: &SBig2) -> String {
    let mag = to_ubig10(value);
    if value.is_negative() {
        format!("-{}", mag.to_decimal_string())
    } else {
        mag.to_decimal_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_ubig10() {
        let u = UBig10::from_decimal_str("123456789012345678901234567890").unwrap();
        let s = from_ubig10(&u);
        let back = to_ubig10(&s);
        assert_eq!(back.to_decimal_string(), "123456789012345678901234567890");
    }

    #[test]
    fn decimal_string_round_trip_with_sign() {
        let a = SBig2::from_decimal_str("-98765432109876543210").unwrap();
        assert_eq!(a.to_decimal_string(), "-98765432109876543210");
        let b = SBig2::from_decimal_str("0").unwrap();
        assert_eq!(b.to_decimal_string(), "0");
        assert!(!b.is_negative());
    }
}
