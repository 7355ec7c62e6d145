//! Decimal string <-> word-vector conversion.
//!
//! Below [`crate::limits::DC_CONVERSION_DIGIT_THRESHOLD`] decimal digits,
//! parsing is a single fused `result = result*B10 + chunk` pass, nine digits
//! at a time. Above it, a recursive high/low split driven by a
//! precomputed `10^(2^level)` power table keeps both parsing and formatting
//! sub-quadratic on huge literals.

use super::mul::multiply;
use super::{add_words, trim};
use crate::error::{BigError, BigResult};
use crate::limits::{B10, DC_CONVERSION_DIGIT_THRESHOLD, DC_TO_STRING_WORD_THRESHOLD, DIGITS_PER_WORD};

/// Parses a plain (non-negative, no separators, no exponent) decimal digit
/// string into canonical little-endian `B10` words.
pub(crate) fn from_decimal_digits(digits: &str) -> BigResult<Vec<u32>> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BigError::conversion(
            "UBig10::from_decimal_str",
            digits,
            "expected only ASCII digits",
        ));
    }
    let trimmed = digits.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };

    let mut words = if trimmed.len() <= DC_CONVERSION_DIGIT_THRESHOLD {
        fused_parse(trimmed)
    } else {
        let table = PowerOfTenTable::new(trimmed.len());
        dc_parse(trimmed.as_bytes(), &table)
    };
    trim(&mut words);
    Ok(words)
}

/// Fused `result = result*B10 + chunk`, nine digits per pass. `digits` must
/// be non-empty ASCII digits with no leading zeros (a single `"0"` is fine).
fn fused_parse(digits: &str) -> Vec<u32> {
    let bytes = digits.as_bytes();
    let first_len = {
        let r = bytes.len() % DIGITS_PER_WORD;
        if r == 0 { DIGITS_PER_WORD } else { r }
    };
    let mut words = vec![std::str::from_utf8(&bytes[..first_len]).unwrap().parse::<u32>().unwrap()];
    let mut i = first_len;
    while i < bytes.len() {
        let chunk: u32 = std::str::from_utf8(&bytes[i..i + DIGITS_PER_WORD]).unwrap().parse().unwrap();
        words = super::mul::multiply_by_word(&words, B10);
        words = add_words(&words, &[chunk]);
        i += DIGITS_PER_WORD;
    }
    words
}

/// Table of `10^(2^level)` (in decimal *digits*, indexed by level), built
/// lazily and reused across the whole recursive parse/format call.
struct PowerOfTenTable {
    /// `powers[level]` holds the word vector for `10^digits_at_level(level)`.
    powers: Vec<Vec<u32>>,
}

impl PowerOfTenTable {
    /// Builds enough levels to cover a value with `max_digits` decimal
    /// digits: level 0 covers `DIGITS_PER_WORD` digits, doubling each level.
    fn new(max_digits: usize) -> Self {
        let mut powers = Vec::new();
        let mut digits_at_level = DIGITS_PER_WORD;
        let mut power = fused_parse(&format!("1{}", "0".repeat(digits_at_level)));
        while digits_at_level < max_digits {
            powers.push(power.clone());
            power = multiply(&power, &power);
            digits_at_level *= 2;
        }
        powers.push(power);
        Self { powers }
    }

    fn digits_at_level(level: usize) -> usize {
        DIGITS_PER_WORD * (1usize << level)
    }

    fn power(&self, level: usize) -> &[u32] {
        &self.powers[level]
    }

    fn top_level(&self) -> usize {
        self.powers.len() - 1
    }
}

fn dc_parse(digits: &[u8], table: &PowerOfTenTable) -> Vec<u32> {
    if digits.len() <= DC_CONVERSION_DIGIT_THRESHOLD {
        return fused_parse(std::str::from_utf8(digits).unwrap());
    }
    let mut level = table.top_level();
    while level > 0 && PowerOfTenTable::digits_at_level(level - 1) >= digits.len() {
        level -= 1;
    }
    let split = PowerOfTenTable::digits_at_level(level);
    if digits.len() <= split {
        return dc_parse(digits, table);
    }
    let (high_digits, low_digits) = digits.split_at(digits.len() - split);
    let high = dc_parse(high_digits, table);
    let low = dc_parse_exact_width(low_digits, table);
    let scaled_high = multiply(&high, table.power(level));
    add_words(&scaled_high, &low)
}

/// Parses a fixed-width low-order block, preserving any leading zeros the
/// width implies (they're significant: this is the low half of a split).
fn dc_parse_exact_width(digits: &[u8], table: &PowerOfTenTable) -> Vec<u32> {
    if digits.len() <= DC_CONVERSION_DIGIT_THRESHOLD {
        return fused_parse(std::str::from_utf8(digits).unwrap());
    }
    dc_parse(digits, table)
}

/// Number of significant decimal digits in canonical words (no leading-zero
/// padding; the single-word zero counts as one digit).
pub(crate) fn digit_count(words: &[u32]) -> usize {
    if words.len() == 1 {
        return decimal_width(words[0]);
    }
    let top = words.len() - 1;
    (words.len() - 1) * DIGITS_PER_WORD + decimal_width(words[top])
}

fn decimal_width(mut v: u32) -> usize {
    if v == 0 {
        return 1;
    }
    let mut n = 0;
    while v > 0 {
        n += 1;
        v /= 10;
    }
    n
}

/// Formats canonical words as a plain decimal string (no leading zeros, no
/// sign).
pub(crate) fn to_decimal_digits(words: &[u32]) -> String {
    if words.len() <= DC_TO_STRING_WORD_THRESHOLD {
        return to_string_repeated_divide(words);
    }
    let table = PowerOfTenTable::new(words.len() * DIGITS_PER_WORD);
    dc_to_string(words, &table)
}

fn to_string_repeated_divide(words: &[u32]) -> String {
    let mut cur = words.to_vec();
    trim(&mut cur);
    if cur.len() == 1 {
        return cur[0].to_string();
    }
    let mut chunks: Vec<u32> = Vec::new();
    loop {
        let (q, r) = super::div::floor_divide_by_u32(&cur, B10);
        chunks.push(r);
        if q.len() == 1 && q[0] == 0 {
            break;
        }
        cur = q;
    }
    let mut s = String::new();
    for (i, chunk) in chunks.iter().rev().enumerate() {
        if i == 0 {
            s.push_str(&chunk.to_string());
        } else {
            s.push_str(&format!("{chunk:09}"));
        }
    }
    s
}

/// Recursive `(high, low) = divmod(n, 10^(2^level))` split, low half
/// zero-padded to `digits_at_level(level)` width.
fn dc_to_string(words: &[u32], table: &PowerOfTenTable) -> String {
    let mut trimmed = words.to_vec();
    trim(&mut trimmed);
    if trimmed.len() <= DC_TO_STRING_WORD_THRESHOLD {
        return to_string_repeated_divide(&trimmed);
    }
    let mut level = table.top_level();
    while level > 0 && super::cmp_words(&trimmed, table.power(level - 1)) == std::cmp::Ordering::Less {
        level -= 1;
    }
    let power = table.power(level);
    let (q, r) = super::div::div_rem_words_plain(&trimmed, power);
    let width = PowerOfTenTable::digits_at_level(level);
    let high = dc_to_string(&q, table);
    let low = dc_to_string(&r, table);
    format!("{high}{}", pad_left(&low, width))
}

fn pad_left(s: &str, width: usize) -> String {
    if s.len() >= width {
        return s.to_string();
    }
    let mut out = "0".repeat(width - s.len());
    out.push_str(s);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ubig10::UBig10;

    #[test]
    fn round_trips_small() {
        for s in ["0", "1", "999999999", "1000000000", "123456789012345678901234567890"] {
            let b = UBig10::from_decimal_str(s).unwrap();
            assert_eq!(b.to_decimal_string(), s);
        }
    }

    #[test]
    fn strips_leading_zeros() {
        let b = UBig10::from_decimal_str("007").unwrap();
        assert_eq!(b.to_decimal_string(), "7");
    }

    #[test]
    fn digit_count_matches_length() {
        let b = UBig10::from_decimal_str("123456789123456789").unwrap();
        assert_eq!(b.significant_digits(), 18);
    }

    #[test]
    fn large_value_round_trips_through_dc_conversion() {
        let digits: String = std::iter::once('1')
            .chain((1..25_000).map(|i| char::from(b'0' + (i % 10) as u8)))
            .collect();
        let b = UBig10::from_decimal_str(&digits).unwrap();
        assert_eq!(b.to_decimal_string(), digits);
    }
}
