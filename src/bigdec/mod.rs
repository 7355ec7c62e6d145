//! `BigDec` — arbitrary-precision decimal floating point.
//!
//! A triple `(sign, coefficient, scale)` where `coefficient` is a
//! [`UBig10`] and `scale` is a signed exponent: value is
//! `(-1)^sign * coefficient * 10^(-scale)`. Positive scale means
//! fractional digits; negative scale means trailing integer zeros not
//! materialized into the coefficient.

mod cache;
mod div;
mod format;
mod round;
mod transcendental;

use std::cmp::Ordering;

use crate::error::{BigError, BigResult};
use crate::parse::parse_decimal;
use crate::ubig10::UBig10;

pub use cache::MathCache;
pub use div::DivMod;
pub use round::RoundingMode;

/// Signed arbitrary-precision decimal. Zero is always stored with
/// `sign = false`, but may carry any scale.
#[derive(Debug, Clone)]
pub struct BigDec {
    pub(crate) sign: bool,
    pub(crate) coefficient: UBig10,
    pub(crate) scale: i64,
}

impl BigDec {
    pub fn zero() -> Self {
        Self { sign: false, coefficient: UBig10::zero(), scale: 0 }
    }

    pub fn one() -> Self {
        Self { sign: false, coefficient: UBig10::one(), scale: 0 }
    }

    pub fn negative_one() -> Self {
        Self { sign: true, coefficient: UBig10::one(), scale: 0 }
    }

    pub(crate) fn new(sign: bool, coefficient: UBig10, scale: i64) -> Self {
        let is_zero = coefficient.is_zero();
        Self {
            sign: sign && !is_zero,
            coefficient,
            scale,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.sign && !self.is_zero()
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    pub fn coefficient(&self) -> &UBig10 {
        &self.coefficient
    }

    pub fn from_i64(v: i64) -> Self {
        let sign = v < 0;
        let mag = (v as i128).unsigned_abs() as u64;
        Self::new(sign, UBig10::from_u64(mag), 0)
    }

    pub fn from_u64(v: u64) -> Self {
        Self::new(false, UBig10::from_u64(v), 0)
    }

    /// Parses a decimal literal (shared grammar with `UBig10`'s
    /// integer-only subset).
    pub fn from_str_radix10(s: &str) -> BigResult<Self> {
        let parsed = parse_decimal(s)?;
        let coefficient = UBig10::from_decimal_str(&parsed.digits)
            .map_err(|e| BigError::conversion("BigDec::from_str_radix10", s, e.to_string()))?;
        Ok(Self::new(parsed.negative, coefficient, parsed.scale))
    }

    /// CPython-`Decimal.__str__`-compatible formatting.
    pub fn to_string_cpython(&self) -> String {
        format::to_string(self)
    }

    // -- comparison -------------------------------------------------------

    /// Magnitude-only three-way comparison, ignoring sign.
    pub fn compare_absolute(&self, other: &Self) -> Ordering {
        let (a, b) = align(self, other);
        a.coefficient.cmp_mag(&b.coefficient)
    }

    pub fn abs(&self) -> Self {
        Self::new(false, self.coefficient.clone(), self.scale)
    }

    pub fn neg(&self) -> Self {
        Self::new(!self.sign, self.coefficient.clone(), self.scale)
    }

    // -- arithmetic ---------------------------------------------------------

    /// Aligns scales to `max(scale_a, scale_b)` via
    /// `multiply_by_power_of_ten`, then adds/subtracts magnitudes with the
    /// sign deduced from operand signs and magnitude comparison.
    pub fn add(&self, other: &Self) -> Self {
        let (a, b) = align(self, other);
        signed_add(a.sign, &a.coefficient, b.sign, &b.coefficient, a.scale)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn add_inplace(&mut self, other: &Self) {
        *self = self.add(other);
    }

    pub fn sub_inplace(&mut self, other: &Self) {
        *self = self.sub(other);
    }

    /// Pure magnitude multiply: `scale_c = scale_a + scale_b`,
    /// `sign_c = sign_a xor sign_b`. No rounding.
    pub fn mul(&self, other: &Self) -> Self {
        let coeff = self.coefficient.mul(&other.coefficient);
        Self::new(self.sign ^ other.sign, coeff, self.scale + other.scale)
    }

    pub fn mul_inplace(&mut self, other: &Self) {
        *self = self.mul(other);
    }

    /// Integer exponentiation via repeated-squaring magnitude multiply;
    /// `scale_c = scale_a * n`.
    pub fn pow(&self, n: u64) -> Self {
        if n == 0 {
            return Self::one();
        }
        let mut base = self.clone();
        let mut result = Self::one();
        let mut e = n;
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&base);
            }
            base = base.mul(&base);
            e >>= 1;
        }
        result
    }

    // -- division -----------------------------------------------------------

    /// Truncating scalar division to `precision` significant digits,
    /// including the exact-division post-check.
    pub fn div(&self, other: &Self, precision: u32) -> BigResult<Self> {
        div::truncating_div(self, other, precision)
    }

    /// Division by a native `u32` scalar, the dedicated path used by every
    /// transcendental inner loop.
    pub fn true_divide_inexact_by_u32(&self, d: u32, precision: u32) -> BigResult<Self> {
        div::true_divide_inexact_by_u32(self, d, precision)
    }

    /// Floor division (`//`): `floor(a/b)` as an integer-valued `BigDec`.
    pub fn floor_div(&self, other: &Self, precision: u32) -> BigResult<Self> {
        Ok(div::divmod(self, other, precision)?.quotient)
    }

    /// Floor-mod (`%`): sign follows the divisor, `a == (a//b)*b + (a%b)`.
    pub fn rem_floor(&self, other: &Self, precision: u32) -> BigResult<Self> {
        Ok(div::divmod(self, other, precision)?.remainder)
    }

    pub fn divmod(&self, other: &Self, precision: u32) -> BigResult<DivMod> {
        div::divmod(self, other, precision)
    }

    // -- rounding -------------------------------------------------------

    /// Rounds to `precision` significant digits under `mode`.
    pub fn round(&self, precision: u32, mode: RoundingMode) -> BigResult<Self> {
        round::round_to_precision(self, precision, mode)
    }

    /// Rescales to an exact target `scale` under `mode`, distinct from
    /// `round` (which targets significant digits rather than a scale).
    pub fn quantize(&self, scale: i64, mode: RoundingMode) -> BigResult<Self> {
        round::quantize(self, scale, mode)
    }

    // -- transcendentals --------------------------------------------------

    pub fn sqrt(&self, precision: u32) -> BigResult<Self> {
        transcendental::sqrt(self, precision)
    }

    pub fn exp(&self, precision: u32) -> BigResult<Self> {
        transcendental::exp(self, precision)
    }

    pub fn ln(&self, precision: u32, cache: &mut MathCache) -> BigResult<Self> {
        transcendental::ln(self, precision, cache)
    }

    pub fn log10(&self, precision: u32, cache: &mut MathCache) -> BigResult<Self> {
        transcendental::log10(self, precision, cache)
    }

    pub fn log(&self, base: &Self, precision: u32, cache: &mut MathCache) -> BigResult<Self> {
        transcendental::log(self, base, precision, cache)
    }

    pub fn root(&self, n: u64, precision: u32) -> BigResult<Self> {
        transcendental::nth_root(self, n, precision)
    }

    pub fn sin(&self, precision: u32, cache: &mut MathCache) -> BigResult<Self> {
        transcendental::sin(self, precision, cache)
    }

    pub fn cos(&self, precision: u32, cache: &mut MathCache) -> BigResult<Self> {
        transcendental::cos(self, precision, cache)
    }

    pub fn tan(&self, precision: u32, cache: &mut MathCache) -> BigResult<Self> {
        transcendental::tan(self, precision, cache)
    }
}

impl PartialEq for BigDec {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for BigDec {}

impl PartialOrd for BigDec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for BigDec {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_zero() && other.is_zero() {
            return Ordering::Equal;
        }
        match (self.is_negative(), other.is_negative()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.compare_absolute(other),
            (true, true) => other.compare_absolute(self),
        }
    }
}

// ============================================================================
// Shared helpers.
// ============================================================================

/// Aligns two values to `max(scale_a, scale_b)`, scaling the smaller-scaled
/// coefficient up via `multiply_by_power_of_ten`. Returns values whose
/// `scale` fields are equal.
pub(crate) fn align(a: &BigDec, b: &BigDec) -> (BigDec, BigDec) {
    if a.scale == b.scale {
        return (a.clone(), b.clone());
    }
    let target = a.scale.max(b.scale);
    let a2 = rescale_up(a, target);
    let b2 = rescale_up(b, target);
    (a2, b2)
}

fn rescale_up(value: &BigDec, target_scale: i64) -> BigDec {
    if value.scale == target_scale {
        return value.clone();
    }
    debug_assert!(target_scale >= value.scale);
    let k = (target_scale - value.scale) as u64;
    let coeff = value.coefficient.multiply_by_power_of_ten(k);
    BigDec::new(value.sign, coeff, target_scale)
}

pub(crate) fn signed_add(a_sign: bool, a: &UBig10, b_sign: bool, b: &UBig10, scale: i64) -> BigDec {
    if a_sign == b_sign {
        return BigDec::new(a_sign, a.add(b), scale);
    }
    match a.cmp_mag(b) {
        Ordering::Equal => BigDec::new(false, UBig10::zero(), scale),
        Ordering::Greater => BigDec::new(a_sign, a.sub(b), scale),
        Ordering::Less => BigDec::new(b_sign, b.sub(a), scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> BigDec {
        BigDec::from_str_radix10(s).unwrap()
    }

    #[test]
    fn zero_is_never_negative() {
        let z = BigDec::from_str_radix10("-0").unwrap();
        assert!(!z.is_negative());
        assert!(z.is_zero());
    }

    #[test]
    fn add_aligns_scales() {
        let a = d("1.5");
        let b = d("2.25");
        let sum = a.add(&b);
        assert_eq!(sum.to_string_cpython(), "3.75");
    }

    #[test]
    fn sub_crossing_zero_flips_sign() {
        let a = d("1.5");
        let b = d("2.25");
        assert_eq!(a.sub(&b).to_string_cpython(), "-0.75");
    }

    #[test]
    fn mul_adds_scales_and_xors_sign() {
        let a = d("1.5");
        let b = d("-2.5");
        assert_eq!(a.mul(&b).to_string_cpython(), "-3.75");
    }

    #[test]
    fn additive_and_multiplicative_identity() {
        let a = d("123.456");
        assert_eq!(a.add(&a.neg()), BigDec::zero());
        assert_eq!(a.mul(&BigDec::one()), a);
    }

    #[test]
    fn pow_matches_repeated_multiplication() {
        let a = d("1.1");
        let direct = a.mul(&a).mul(&a);
        assert_eq!(a.pow(3), direct);
    }

    #[test]
    fn ordering_respects_sign_and_magnitude() {
        assert!(d("-5") < d("3"));
        assert!(d("3.1") > d("3.05"));
        assert_eq!(d("1.50"), d("1.5"));
    }
}
