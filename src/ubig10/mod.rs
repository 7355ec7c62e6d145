//! `UBig10` — unsigned big integer in radix 10^9.
//!
//! Little-endian words, each in `[0, B10)`. Canonical form: at least one
//! word, and the leading word is non-zero unless the value is zero. Value
//! semantics throughout — `Clone`, comparison via `Ord` built from the
//! limbs — with the limb count a runtime property rather than a type
//! parameter.

mod convert;
mod div;
mod mul;
mod sqrt;

use std::cmp::Ordering;

use crate::error::{BigError, BigResult};
use crate::limits::B10;

pub use div::DivRem;

/// Unsigned big integer, little-endian radix-`B10` words.
#[derive(Debug, Clone)]
pub struct UBig10 {
    pub(crate) words: Vec<u32>,
}

impl UBig10 {
    pub const ZERO: &'static str = "0";

    /// Builds a `UBig10` directly from canonical little-endian words.
    ///
    /// Used internally by the multiply/divide tiers, which already produce
    /// canonical output; re-trims defensively since callers outside this
    /// module cannot be trusted to hand over a canonical vector.
    pub(crate) fn from_words(mut words: Vec<u32>) -> Self {
        trim(&mut words);
        Self { words }
    }

    pub fn zero() -> Self {
        Self { words: vec![0] }
    }

    pub fn one() -> Self {
        Self { words: vec![1] }
    }

    pub fn is_zero(&self) -> bool {
        self.words.len() == 1 && self.words[0] == 0
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn word_len(&self) -> usize {
        self.words.len()
    }

    /// Constructs from a native `u64`.
    pub fn from_u64(mut v: u64) -> Self {
        if v == 0 {
            return Self::zero();
        }
        let mut words = Vec::new();
        while v > 0 {
            words.push((v % B10 as u64) as u32);
            v /= B10 as u64;
        }
        Self { words }
    }

    /// Constructs from a native `u128`.
    pub fn from_u128(mut v: u128) -> Self {
        if v == 0 {
            return Self::zero();
        }
        let mut words = Vec::new();
        while v > 0 {
            words.push((v % B10 as u128) as u32);
            v /= B10 as u128;
        }
        Self { words }
    }

    /// Attempts to narrow to a `u64`, failing with [`BigError::Overflow`] if
    /// the value does not fit.
    pub fn to_u64(&self) -> BigResult<u64> {
        let mut acc: u128 = 0;
        for &w in self.words.iter().rev() {
            acc = acc
                .checked_mul(B10 as u128)
                .and_then(|a| a.checked_add(w as u128))
                .ok_or_else(|| BigError::overflow("UBig10::to_u64", "exceeds u128 during accumulation"))?;
            if acc > u64::MAX as u128 {
                return Err(BigError::overflow("UBig10::to_u64", "exceeds u64::MAX"));
            }
        }
        Ok(acc as u64)
    }

    /// Like [`Self::to_u64`], but reports out-of-range as `None` instead of
    /// a typed error — useful where the caller already treats "doesn't fit"
    /// as a plain branch rather than a propagated failure.
    pub fn to_u64_checked(&self) -> Option<u64> {
        self.to_u64().ok()
    }

    /// Approximate bit length: `9*(word_count-1)` decimal digits worth of
    /// bits for the lower words (over-counted via `log2(10)*9 ~ 29.9`,
    /// rounded up to 30) plus the exact bit length of the leading word's
    /// decimal value. Cheap and good enough for isqrt tier selection; not a
    /// substitute for `SBig2::bit_length`, which is exact.
    pub fn bit_length_approx(&self) -> u64 {
        if self.is_zero() {
            return 0;
        }
        let lower_words = (self.words.len() - 1) as u64;
        let top_bits = 32 - self.words[self.words.len() - 1].leading_zeros() as u64;
        lower_words * 30 + top_bits
    }

    /// Parses a plain (non-scientific, unsigned) decimal digit string.
    pub fn from_decimal_str(digits: &str) -> BigResult<Self> {
        convert::from_decimal_digits(digits)
    }

    /// Formats as a plain decimal digit string, no leading zeros.
    pub fn to_decimal_string(&self) -> String {
        convert::to_decimal_digits(&self.words)
    }

    /// Number of significant decimal digits (no leading-zero padding).
    pub fn significant_digits(&self) -> usize {
        convert::digit_count(&self.words)
    }

    // -- comparison -----------------------------------------------------

    pub fn cmp_mag(&self, other: &Self) -> Ordering {
        cmp_words(&self.words, &other.words)
    }

    // -- add / sub --------------------------------------------------------

    pub fn add(&self, other: &Self) -> Self {
        Self::from_words(add_words(&self.words, &other.words))
    }

    pub fn add_inplace(&mut self, other: &Self) {
        self.words = add_words(&self.words, &other.words);
    }

    /// Subtracts `other` from `self`. Caller must ensure `self >= other`;
    /// this is a precondition rather than a checked error.
    pub fn sub(&self, other: &Self) -> Self {
        debug_assert!(self.cmp_mag(other) != Ordering::Less, "UBig10::sub requires self >= other");
        Self::from_words(sub_words(&self.words, &other.words))
    }

    pub fn sub_inplace(&mut self, other: &Self) {
        debug_assert!(self.cmp_mag(other) != Ordering::Less, "UBig10::sub_inplace requires self >= other");
        self.words = sub_words(&self.words, &other.words);
    }

    // -- multiplication ----------------------------------------------------

    pub fn mul(&self, other: &Self) -> Self {
        Self::from_words(mul::multiply(&self.words, &other.words))
    }

    /// Multiplies by a single word; the hot path behind base conversion,
    /// Taylor-series step sizing, and BigDec's power-of-ten scaling.
    pub fn mul_u32(&self, d: u32) -> Self {
        Self::from_words(mul::multiply_by_word(&self.words, d))
    }

    pub fn mul_u32_inplace(&mut self, d: u32) {
        self.words = mul::multiply_by_word(&self.words, d);
    }

    // -- division ------------------------------------------------------

    /// `(quotient, remainder)` for a single-word divisor, one downward sweep.
    pub fn floor_divide_by_u32(&self, d: u32) -> BigResult<(Self, u32)> {
        if d == 0 {
            return Err(BigError::division_by_zero("UBig10::floor_divide_by_u32"));
        }
        let (q, r) = div::floor_divide_by_u32(&self.words, d);
        Ok((Self::from_words(q), r))
    }

    /// General `self / other`, schoolbook below the Burnikel-Ziegler cutoff,
    /// Burnikel-Ziegler recursive division above it.
    pub fn div_rem(&self, other: &Self) -> BigResult<DivRem> {
        div::div_rem(self, other)
    }

    // -- scalar ten-power helpers -------------------------------------

    /// Multiplies by `10^k` via a pure word shift (`k` a multiple of 9) plus
    /// a single-word multiply for the remainder. The only operation BigDec
    /// uses to align scales.
    pub fn multiply_by_power_of_ten(&self, k: u64) -> Self {
        mul::multiply_by_power_of_ten(self, k)
    }

    /// Truncating `floor(self / 10^(9*k))`: drops the low `k` words outright.
    pub fn floor_divide_by_power_of_billion(&self, k: usize) -> Self {
        div::floor_divide_by_power_of_billion(self, k)
    }

    // -- isqrt ------------------------------------------------------------

    pub fn isqrt(&self) -> Self {
        sqrt::isqrt(self)
    }
}

impl PartialEq for UBig10 {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}
impl Eq for UBig10 {}

impl PartialOrd for UBig10 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp_mag(other))
    }
}
impl Ord for UBig10 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_mag(other)
    }
}

impl std::hash::Hash for UBig10 {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.words.hash(state);
    }
}

// ============================================================================
// Free-function word-array primitives shared by mul/div/convert/sqrt.
// ============================================================================

/// Strips trailing (most-significant) zero words, leaving a single zero word
/// if the value collapses to zero.
pub(crate) fn trim(words: &mut Vec<u32>) {
    while words.len() > 1 && *words.last().unwrap() == 0 {
        words.pop();
    }
    if words.is_empty() {
        words.push(0);
    }
}

pub(crate) fn cmp_words(a: &[u32], b: &[u32]) -> Ordering {
    let a = trimmed_len(a);
    let b = trimmed_len(b);
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {
            for i in (0..a.len()).rev() {
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

fn trimmed_len(words: &[u32]) -> &[u32] {
    let mut end = words.len();
    while end > 1 && words[end - 1] == 0 {
        end -= 1;
    }
    &words[..end]
}

pub(crate) fn is_zero_words(words: &[u32]) -> bool {
    words.iter().all(|&w| w == 0)
}

/// Word-wise addition with a 64-bit carry absorbing the `B10` wrap.
/// SIMD-vectorizable in spirit: every lane is an independent `u64`
/// add-compare-subtract, correctness never depends on it.
pub(crate) fn add_words(a: &[u32], b: &[u32]) -> Vec<u32> {
    let n = a.len().max(b.len());
    let mut out = Vec::with_capacity(n + 1);
    let mut carry: u64 = 0;
    for i in 0..n {
        let av = *a.get(i).unwrap_or(&0) as u64;
        let bv = *b.get(i).unwrap_or(&0) as u64;
        let s = av + bv + carry;
        if s >= B10 as u64 {
            out.push((s - B10 as u64) as u32);
            carry = 1;
        } else {
            out.push(s as u32);
            carry = 0;
        }
    }
    if carry > 0 {
        out.push(carry as u32);
    }
    out
}

/// Word-wise subtraction assuming `a >= b`; trims the result to canonical
/// form.
pub(crate) fn sub_words(a: &[u32], b: &[u32]) -> Vec<u32> {
    let n = a.len();
    let mut out = Vec::with_capacity(n);
    let mut borrow: i64 = 0;
    for i in 0..n {
        let av = a[i] as i64;
        let bv = *b.get(i).unwrap_or(&0) as i64;
        let mut d = av - bv - borrow;
        if d < 0 {
            d += B10 as i64;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out.push(d as u32);
    }
    trim(&mut out);
    out
}

/// Prepends `k` zero words, i.e. multiplies by `B10^k`.
pub(crate) fn shift_words(words: &[u32], k: usize) -> Vec<u32> {
    if is_zero_words(words) {
        return vec![0];
    }
    let mut out = Vec::with_capacity(words.len() + k);
    out.extend(std::iter::repeat(0u32).take(k));
    out.extend_from_slice(words);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_canonical() {
        let z = UBig10::zero();
        assert_eq!(z.words(), &[0]);
        assert!(z.is_zero());
    }

    #[test]
    fn from_u64_roundtrip() {
        for v in [0u64, 1, 999_999_999, 1_000_000_000, u64::MAX] {
            let b = UBig10::from_u64(v);
            assert_eq!(b.to_u64().unwrap(), v);
        }
    }

    #[test]
    fn add_carries_across_words() {
        let a = UBig10::from_u64(999_999_999);
        let b = UBig10::from_u64(1);
        let sum = a.add(&b);
        assert_eq!(sum.to_u64().unwrap(), 1_000_000_000);
    }

    #[test]
    fn sub_borrows_across_words() {
        let a = UBig10::from_u64(1_000_000_000);
        let b = UBig10::from_u64(1);
        let diff = a.sub(&b);
        assert_eq!(diff.to_u64().unwrap(), 999_999_999);
    }

    #[test]
    fn canonical_form_has_no_leading_zero_word() {
        let a = UBig10::from_u64(5);
        let b = UBig10::from_u64(5);
        let diff = a.sub(&b);
        assert_eq!(diff.words(), &[0]);
    }

    #[test]
    fn to_u64_checked_reports_overflow_as_none() {
        assert_eq!(UBig10::from_u64(42).to_u64_checked(), Some(42));
        let huge = UBig10::from_decimal_str(&"9".repeat(40)).unwrap();
        assert_eq!(huge.to_u64_checked(), None);
    }

    #[test]
    fn bit_length_approx_brackets_the_exact_value() {
        assert_eq!(UBig10::zero().bit_length_approx(), 0);
        for v in [1u64, 2, 255, 256, 999_999_999, 1_000_000_000, u64::MAX] {
            let approx = UBig10::from_u64(v).bit_length_approx();
            let exact = 64 - v.leading_zeros() as u64;
            assert!(approx >= exact, "approx {approx} should not undercount exact {exact} for {v}");
        }
    }
}
