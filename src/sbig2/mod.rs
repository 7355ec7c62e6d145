//! `SBig2` — signed big integer in radix 2^32.
//!
//! Backs the hard algorithms where base-2 density matters: `UBig10::isqrt`
//! for very large magnitudes hands off here, and the bitwise surface
//! (`<< >> & | ^ ~`) is expressed natively in this radix rather than
//! simulated over decimal words.

mod bitwise;
mod convert;
mod div;
mod mul;
mod sqrt;

use std::cmp::Ordering;

use crate::error::{BigError, BigResult};
use crate::ubig10::UBig10;

pub use div::SDivRem;

/// Signed big integer, little-endian radix-2^32 words. Zero is always
/// stored as a single zero word with `sign = false`.
#[derive(Debug, Clone)]
pub struct SBig2 {
    pub(crate) sign: bool,
    pub(crate) words: Vec<u32>,
}

impl SBig2 {
    pub fn zero() -> Self {
        Self { sign: false, words: vec![0] }
    }

    pub fn one() -> Self {
        Self { sign: false, words: vec![1] }
    }

    pub fn negative_one() -> Self {
        Self { sign: true, words: vec![1] }
    }

    pub fn is_zero(&self) -> bool {
        self.words.len() == 1 && self.words[0] == 0
    }

    pub fn is_negative(&self) -> bool {
        self.sign && !self.is_zero()
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub(crate) fn from_words(sign: bool, mut words: Vec<u32>) -> Self {
        trim(&mut words);
        let is_zero = words.len() == 1 && words[0] == 0;
        Self {
            sign: sign && !is_zero,
            words,
        }
    }

    pub fn from_i64(v: i64) -> Self {
        let sign = v < 0;
        let mag = (v as i128).unsigned_abs() as u64;
        Self::from_words(sign, words_from_u64(mag))
    }

    pub fn from_u64(v: u64) -> Self {
        Self::from_words(false, words_from_u64(v))
    }

    pub fn from_i128(v: i128) -> Self {
        let sign = v < 0;
        let mag = v.unsigned_abs();
        Self::from_words(sign, words_from_u128(mag))
    }

    /// Narrows to `u64`, failing with [`BigError::Overflow`] for negative or
    /// oversized values.
    pub fn to_u64(&self) -> BigResult<u64> {
        if self.is_negative() {
            return Err(BigError::overflow("SBig2::to_u64", "value is negative"));
        }
        let mut acc: u128 = 0;
        for &w in self.words.iter().rev() {
            acc = acc
                .checked_mul(1u128 << 32)
                .and_then(|a| a.checked_add(w as u128))
                .ok_or_else(|| BigError::overflow("SBig2::to_u64", "exceeds u128 during accumulation"))?;
            if acc > u64::MAX as u128 {
                return Err(BigError::overflow("SBig2::to_u64", "exceeds u64::MAX"));
            }
        }
        Ok(acc as u64)
    }

    pub fn bit_length(&self) -> u64 {
        bit_length_words(&self.words)
    }

    // -- comparison ---------------------------------------------------

    pub fn cmp_mag(&self, other: &Self) -> Ordering {
        cmp_words(&self.words, &other.words)
    }

    // -- construction from / to UBig10 (the isqrt handoff bridge) -------

    pub fn from_ubig10(value: &UBig10) -> Self {
        convert::from_ubig10(value)
    }

    pub fn to_ubig10(&self) -> UBig10 {
        convert::to_ubig10(self)
    }

    pub fn from_decimal_str(s: &str) -> BigResult<Self> {
        convert::from_decimal_str(s)
    }

    pub fn to_decimal_string(&self) -> String {
        convert::to_decimal_string(self)
    }

    // -- add / sub ------------------------------------------------------

    pub fn add(&self, other: &Self) -> Self {
        signed_add(self.sign, &self.words, other.sign, &other.words)
    }

    pub fn sub(&self, other: &Self) -> Self {
        signed_add(self.sign, &self.words, !other.sign, &other.words)
    }

    pub fn neg(&self) -> Self {
        Self::from_words(!self.sign, self.words.clone())
    }

    pub fn abs(&self) -> Self {
        Self::from_words(false, self.words.clone())
    }

    // -- multiply / divide ----------------------------------------------

    pub fn mul(&self, other: &Self) -> Self {
        let mag = mul::multiply(&self.words, &other.words);
        Self::from_words(self.sign ^ other.sign, mag)
    }

    pub fn mul_u32(&self, d: u32) -> Self {
        Self::from_words(self.sign, mul::multiply_by_word(&self.words, d))
    }

    /// Truncating (toward zero) division, Python `//`-on-magnitudes style:
    /// quotient sign is `a.sign ^ b.sign`, remainder takes the dividend's
    /// sign, both on magnitudes from Knuth Algorithm D.
    pub fn div_rem(&self, other: &Self) -> BigResult<SDivRem> {
        div::div_rem(self, other)
    }

    // -- isqrt -----------------------------------------------------------

    pub fn isqrt(&self) -> Self {
        sqrt::isqrt(self)
    }

    // -- bitwise ----------------------------------------------------------

    pub fn shl(&self, k: u32) -> Self {
        bitwise::shl(self, k)
    }

    pub fn shr(&self, k: u32) -> Self {
        bitwise::shr(self, k)
    }

    pub fn bitand(&self, other: &Self) -> Self {
        bitwise::bitop(self, other, |a, b| a & b)
    }

    pub fn bitor(&self, other: &Self) -> Self {
        bitwise::bitop(self, other, |a, b| a | b)
    }

    pub fn bitxor(&self, other: &Self) -> Self {
        bitwise::bitop(self, other, |a, b| a ^ b)
    }

    /// `~x = -(x + 1)` for all `x`.
    pub fn not(&self) -> Self {
        self.neg().sub(&Self::one())
    }
}

impl PartialEq for SBig2 {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.words == other.words
    }
}
impl Eq for SBig2 {}

impl PartialOrd for SBig2 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for SBig2 {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_mag(other),
            (true, true) => other.cmp_mag(self),
        }
    }
}

// ============================================================================
// Shared word-array primitives.
// ============================================================================

pub(crate) fn trim(words: &mut Vec<u32>) {
    while words.len() > 1 && *words.last().unwrap() == 0 {
        words.pop();
    }
    if words.is_empty() {
        words.push(0);
    }
}

pub(crate) fn is_zero_words(words: &[u32]) -> bool {
    words.iter().all(|&w| w == 0)
}

pub(crate) fn cmp_words(a: &[u32], b: &[u32]) -> Ordering {
    let la = trimmed_len(a);
    let lb = trimmed_len(b);
    match la.cmp(&lb) {
        Ordering::Equal => {
            for i in (0..la).rev() {
                match a[i].cmp(&b[i]) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            Ordering::Equal
        }
        other => other,
    }
}

fn trimmed_len(words: &[u32]) -> usize {
    let mut end = words.len();
    while end > 1 && words[end - 1] == 0 {
        end -= 1;
    }
    end
}

pub(crate) fn add_words(a: &[u32], b: &[u32]) -> Vec<u32> {
    let n = a.len().max(b.len());
    let mut out = Vec::with_capacity(n + 1);
    let mut carry: u64 = 0;
    for i in 0..n {
        let av = *a.get(i).unwrap_or(&0) as u64;
        let bv = *b.get(i).unwrap_or(&0) as u64;
        let s = av + bv + carry;
        out.push(s as u32);
        carry = s >> 32;
    }
    if carry > 0 {
        out.push(carry as u32);
    }
    out
}

/// Subtracts `b` from `a`, assuming `a >= b` in magnitude.
pub(crate) fn sub_words(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len());
    let mut borrow: i64 = 0;
    for i in 0..a.len() {
        let av = a[i] as i64;
        let bv = *b.get(i).unwrap_or(&0) as i64;
        let mut d = av - bv - borrow;
        if d < 0 {
            d += 1i64 << 32;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out.push(d as u32);
    }
    trim(&mut out);
    out
}

pub(crate) fn shift_words(words: &[u32], k: usize) -> Vec<u32> {
    if is_zero_words(words) {
        return vec![0];
    }
    let mut out = Vec::with_capacity(words.len() + k);
    out.extend(std::iter::repeat(0u32).take(k));
    out.extend_from_slice(words);
    out
}

pub(crate) fn bit_length_words(words: &[u32]) -> u64 {
    let len = trimmed_len(words);
    if len == 1 && words[0] == 0 {
        return 0;
    }
    (len as u64 - 1) * 32 + (32 - words[len - 1].leading_zeros() as u64)
}

fn signed_add(a_sign: bool, a: &[u32], b_sign: bool, b: &[u32]) -> SBig2 {
    if a_sign == b_sign {
        return SBig2::from_words(a_sign, add_words(a, b));
    }
    match cmp_words(a, b) {
        Ordering::Equal => SBig2::zero(),
        Ordering::Greater => SBig2::from_words(a_sign, sub_words(a, b)),
        Ordering::Less => SBig2::from_words(b_sign, sub_words(b, a)),
    }
}

fn words_from_u64(mut v: u64) -> Vec<u32> {
    if v == 0 {
        return vec![0];
    }
    let mut words = Vec::new();
    while v > 0 {
        words.push(v as u32);
        v >>= 32;
    }
    words
}

fn words_from_u128(mut v: u128) -> Vec<u32> {
    if v == 0 {
        return vec![0];
    }
    let mut words = Vec::new();
    while v > 0 {
        words.push(v as u32);
        v >>= 32;
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_canonical() {
        let z = SBig2::zero();
        assert!(z.is_zero());
        assert!(!z.is_negative());
    }

    #[test]
    fn signed_add_matches_native() {
        for (x, y) in [(5i64, 3i64), (-5, 3), (5, -3), (-5, -3), (0, 7), (7, 0)] {
            let a = SBig2::from_i64(x);
            let b = SBig2::from_i64(y);
            let sum = a.add(&b);
            let expected = x + y;
            if expected >= 0 {
                assert_eq!(sum.to_u64().unwrap(), expected as u64);
            } else {
                assert!(sum.is_negative());
            }
        }
    }

    #[test]
    fn not_matches_two_complement_identity() {
        let a = SBig2::from_i64(5);
        let not_a = a.not();
        // ~x = -(x+1)
        assert_eq!(not_a, SBig2::from_i64(-6));
    }

    #[test]
    fn ordering_mixes_sign_and_magnitude() {
        let a = SBig2::from_i64(-100);
        let b = SBig2::from_i64(5);
        assert!(a < b);
        assert!(SBig2::from_i64(-5) < SBig2::from_i64(-1));
    }
}
