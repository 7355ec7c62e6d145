//! BigDec transcendentals: `exp`, `ln`, `log10`, `log`, `sqrt`,
//! `nth_root`, `sin`/`cos`/`tan`.
//!
//! All work at a working precision `P + BUFFER_DIGITS` and round down to
//! `P` at the end. One algorithmic trade-off is recorded in `DESIGN.md`:
//! sqrt's large-input path reuses `UBig10::isqrt`'s own SBig2 handoff
//! rather than a second reciprocal-sqrt Newton layer.

use crate::error::{BigError, BigResult};
use crate::limits::{BUFFER_DIGITS_DEFAULT, BUFFER_DIGITS_TRIG, NEWTON_SEED_DIGITS};

use super::cache::MathCache;
use super::round::RoundingMode;
use super::BigDec;

fn working_precision(p: u32, buffer: u32) -> u32 {
    p.saturating_add(buffer)
}

fn double_bigdec(v: &BigDec) -> BigDec {
    BigDec::new(v.sign, v.coefficient.mul_u32(2), v.scale)
}

/// Exact halving: `v/2 = v*5 * 10^-1`, no rounding (terminates because 2
/// divides 10).
fn halve_bigdec(v: &BigDec) -> BigDec {
    BigDec::new(v.sign, v.coefficient.mul_u32(5), v.scale + 1)
}

/// True when `value`'s magnitude is below `10^-working_precision`: the
/// leading digit's decimal exponent is `digits - 1 - scale`.
fn is_negligible(value: &BigDec, working_precision: u32) -> bool {
    if value.is_zero() {
        return true;
    }
    let digits = value.coefficient.significant_digits() as i64;
    let adjusted = digits - 1 - value.scale;
    adjusted <= -(working_precision as i64)
}

/// Coarse `f64` approximation of a `BigDec`'s value, used only to seed
/// Newton iterations.
fn to_f64_approx(value: &BigDec) -> f64 {
    if value.is_zero() {
        return 0.0;
    }
    let digits = value.coefficient.to_decimal_string();
    let mantissa_len = digits.len().min(15);
    let mantissa: f64 = digits[..mantissa_len].parse().unwrap_or(1.0);
    let exponent = (digits.len() - mantissa_len) as i64 - value.scale;
    let magnitude = mantissa * 10f64.powi(exponent as i32);
    if value.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

fn from_f64_approx(v: f64) -> BigDec {
    if !v.is_finite() || v == 0.0 {
        return BigDec::zero();
    }
    let s = format!("{v:.17e}");
    BigDec::from_str_radix10(&s.replace('e', "E")).unwrap_or_else(|_| BigDec::one())
}

// ============================================================================
// exp
// ============================================================================

/// `exp(x, P)`: range-reduce by halving `M` times (exact), Taylor-expand
/// the now-tiny argument, square the result `M` times to undo the
/// reduction.
pub(crate) fn exp(x: &BigDec, precision: u32) -> BigResult<BigDec> {
    if precision == 0 {
        return Err(BigError::precision("BigDec::exp", "precision must be > 0"));
    }
    if x.is_zero() {
        return Ok(BigDec::one());
    }
    let pw = working_precision(precision, BUFFER_DIGITS_DEFAULT);
    let m = ((3.322 * pw as f64).sqrt().ceil() as u32).max(1);
    let guard = (0.35 * m as f64) as u32 + 3;
    let series_precision = pw + guard;

    let mut y = x.clone();
    for _ in 0..m {
        y = halve_bigdec(&y);
    }

    let mut sum = BigDec::one();
    let mut term = BigDec::one();
    let max_terms = (series_precision as usize) * 2 + 64;
    for k in 1u32..=(max_terms as u32) {
        term = term.mul(&y);
        term = term.true_divide_inexact_by_u32(k, series_precision)?;
        if is_negligible(&term, series_precision) {
            break;
        }
        sum = sum.add(&term);
    }

    for _ in 0..m {
        sum = sum.mul(&sum);
    }

    sum.round(precision, RoundingMode::HalfEven)
}

// ============================================================================
// ln / log10 / log
// ============================================================================

/// Natural log via base-2 reduction to `[0.5, 1.5)` (exact halving/doubling)
/// followed by the `2*atanh((x-1)/(x+1))` series.
pub(crate) fn ln(x: &BigDec, precision: u32, cache: &mut MathCache) -> BigResult<BigDec> {
    if x.is_negative() || x.is_zero() {
        return Err(BigError::domain("BigDec::ln", x.to_string_cpython()));
    }
    if precision == 0 {
        return Err(BigError::precision("BigDec::ln", "precision must be > 0"));
    }
    let pw = working_precision(precision, BUFFER_DIGITS_DEFAULT);

    let (reduced, k) = reduce_pow2(x);
    let w = reduced.sub(&BigDec::one()).div(&reduced.add(&BigDec::one()), pw)?;
    let series = atanh_series(&w, pw)?;
    let ln_reduced = double_bigdec(&series);

    let ln2 = cache.ln2(pw, |p| compute_ln2(p))?;
    let result = if k == 0 {
        ln_reduced
    } else {
        ln_reduced.add(&BigDec::from_i64(k).mul(&ln2))
    };
    result.round(precision, RoundingMode::HalfEven)
}

/// Reduces `x > 0` to `x = reduced * 2^k` with `reduced` in `[0.5, 1.5)`,
/// via exact halving/doubling (no precision loss in the reduction itself).
fn reduce_pow2(x: &BigDec) -> (BigDec, i64) {
    let half = BigDec::from_str_radix10("0.5").unwrap();
    let one_half_upper = BigDec::from_str_radix10("1.5").unwrap();
    let mut v = x.abs();
    let mut k: i64 = 0;
    while v.compare_absolute(&one_half_upper) != std::cmp::Ordering::Less {
        v = halve_bigdec(&v);
        k += 1;
    }
    while v.compare_absolute(&half) == std::cmp::Ordering::Less {
        v = double_bigdec(&v);
        k -= 1;
    }
    (v, k)
}

/// `atanh(w) = w + w^3/3 + w^5/5 + ...`, for `|w| < 1`.
fn atanh_series(w: &BigDec, precision: u32) -> BigResult<BigDec> {
    let w2 = w.mul(w);
    let mut term = w.clone();
    let mut sum = w.clone();
    let max_terms = precision as usize * 2 + 64;
    for i in 1..=max_terms {
        term = term.mul(&w2);
        let denom = (2 * i + 1) as u32;
        let piece = term.true_divide_inexact_by_u32(denom, precision)?;
        if is_negligible(&piece, precision) {
            break;
        }
        sum = sum.add(&piece);
    }
    Ok(sum)
}

fn compute_ln2(precision: u32) -> BigResult<BigDec> {
    let pw = precision + BUFFER_DIGITS_DEFAULT;
    let third = BigDec::one().div(&BigDec::from_i64(3), pw)?;
    let series = atanh_series(&third, pw)?;
    double_bigdec(&series).round(precision, RoundingMode::HalfEven)
}

fn compute_ln1_25(precision: u32) -> BigResult<BigDec> {
    let pw = precision + BUFFER_DIGITS_DEFAULT;
    let ninth = BigDec::one().div(&BigDec::from_i64(9), pw)?;
    let series = atanh_series(&ninth, pw)?;
    double_bigdec(&series).round(precision, RoundingMode::HalfEven)
}

/// `ln10 = ln1.25 + 3*ln2` (since `10 = 1.25 * 2^3`). Takes the two inputs
/// by value rather than `&mut MathCache` so it can be used as `ln10`'s own
/// cache-miss closure without a second mutable borrow of the cache.
fn compute_ln10_from(ln1_25: &BigDec, ln2: &BigDec, precision: u32) -> BigResult<BigDec> {
    let result = ln1_25.add(&BigDec::from_i64(3).mul(ln2));
    result.round(precision, RoundingMode::HalfEven)
}

pub(crate) fn log10(x: &BigDec, precision: u32, cache: &mut MathCache) -> BigResult<BigDec> {
    let pw = working_precision(precision, BUFFER_DIGITS_DEFAULT);
    let ln_x = ln(x, pw, cache)?;
    let ln1_25 = cache.ln1_25(pw, compute_ln1_25)?;
    let ln2 = cache.ln2(pw, compute_ln2)?;
    let ln10 = cache.ln10(pw, |p| compute_ln10_from(&ln1_25, &ln2, p))?;
    ln_x.div(&ln10, precision)
}

pub(crate) fn log(x: &BigDec, base: &BigDec, precision: u32, cache: &mut MathCache) -> BigResult<BigDec> {
    if base.is_negative() || base.is_zero() || *base == BigDec::one() {
        return Err(BigError::domain("BigDec::log", "base must be positive and != 1"));
    }
    let pw = working_precision(precision, BUFFER_DIGITS_DEFAULT);
    let ln_x = ln(x, pw, cache)?;
    let ln_base = ln(base, pw, cache)?;
    ln_x.div(&ln_base, precision)
}

// ============================================================================
// sqrt / nth_root
// ============================================================================

/// Special case of `nth_root(x, 2, P)`: rescale the coefficient to an even
/// number of digits, run `UBig10::isqrt` (which itself hands huge
/// magnitudes to SBig2's precision-doubling algorithm), and detect exact
/// results directly from the zero remainder.
pub(crate) fn sqrt(x: &BigDec, precision: u32) -> BigResult<BigDec> {
    if x.is_negative() {
        return Err(BigError::domain("BigDec::sqrt", "negative operand"));
    }
    if precision == 0 {
        return Err(BigError::precision("BigDec::sqrt", "precision must be > 0"));
    }
    if x.is_zero() {
        return Ok(BigDec::zero());
    }
    let pw = working_precision(precision, BUFFER_DIGITS_DEFAULT) as i64;
    let digits = x.coefficient.significant_digits() as i64;

    let mut delta = (2 * pw - digits).max(0);
    if (x.scale + delta) % 2 != 0 {
        delta += 1;
    }
    let scaled_coeff = x.coefficient.multiply_by_power_of_ten(delta as u64);
    let exponent = x.scale + delta; // even by construction
    let root = scaled_coeff.isqrt();
    let result = BigDec::new(false, root, exponent / 2);
    result.round(precision, RoundingMode::HalfEven)
}

/// Repeated-squaring `value^exp`, rounding after every multiply so the
/// coefficient never grows past `precision` digits — unlike `BigDec::pow`
/// (exact, unbounded growth), this is the variant Newton's inner loop needs
/// for large root degrees.
fn pow_rounded(value: &BigDec, exp: u64, precision: u32) -> BigResult<BigDec> {
    if exp == 0 {
        return Ok(BigDec::one());
    }
    let mut base = value.round(precision, RoundingMode::HalfEven)?;
    let mut result = BigDec::one();
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = result.mul(&base).round(precision, RoundingMode::HalfEven)?;
        }
        e >>= 1;
        if e > 0 {
            base = base.mul(&base).round(precision, RoundingMode::HalfEven)?;
        }
    }
    Ok(result)
}

/// Direct Newton with precision doubling:
/// `r_{k+1} = ((n-1)*r_k + x/r_k^(n-1)) / n`.
pub(crate) fn nth_root(x: &BigDec, n: u64, precision: u32) -> BigResult<BigDec> {
    if n == 0 {
        return Err(BigError::domain("BigDec::root", "root degree must be >= 1"));
    }
    if precision == 0 {
        return Err(BigError::precision("BigDec::root", "precision must be > 0"));
    }
    if x.is_negative() && n % 2 == 0 {
        return Err(BigError::domain("BigDec::root", "even root of a negative value"));
    }
    if x.is_zero() {
        return Ok(BigDec::zero());
    }
    if n == 1 {
        return x.round(precision, RoundingMode::HalfEven);
    }
    if n > 1000 {
        return Err(BigError::domain("BigDec::root", "root degree exceeds direct-Newton range (n <= 1000)"));
    }

    let negative_result = x.is_negative();
    let magnitude = x.abs();
    let pw = working_precision(precision, BUFFER_DIGITS_DEFAULT);

    let approx = to_f64_approx(&magnitude).powf(1.0 / n as f64);
    let mut r = from_f64_approx(approx);
    if r.is_zero() {
        r = BigDec::one();
    }

    let mut cur_precision = NEWTON_SEED_DIGITS.min(pw);
    loop {
        tracing::trace!(n, cur_precision, target = pw, "nth_root newton iteration");
        let r_pow = pow_rounded(&r, n - 1, cur_precision)?;
        let correction = magnitude.div(&r_pow, cur_precision)?;
        let numerator = BigDec::from_i64(n as i64 - 1).mul(&r).add(&correction);
        r = numerator.true_divide_inexact_by_u32(n as u32, cur_precision)?;
        if cur_precision >= pw {
            break;
        }
        cur_precision = (cur_precision * 2).min(pw);
    }

    // Perfect-power detection: an exact `result^n == x` check. Round to the
    // full working precision, not just the caller's requested `precision` -
    // an exact root can need more significant digits than the caller asked
    // for to come back bit-for-bit equal once raised to the n-th power.
    let rounded_int = r.round(pw.max(1), RoundingMode::HalfEven)?;
    let maybe_exact = rounded_int.pow(n);
    if maybe_exact.compare_absolute(&magnitude) == std::cmp::Ordering::Equal {
        let result = if negative_result { rounded_int.neg() } else { rounded_int };
        return Ok(result);
    }

    let result = if negative_result { r.neg() } else { r };
    result.round(precision, RoundingMode::HalfEven)
}

// ============================================================================
// sin / cos / tan
// ============================================================================

// Chudnovsky series constants: 1/pi = 12 * sum_k (-1)^k (6k)!(13591409 +
// 545140134k) / ((3k)!(k!)^3 640320^(3k+3/2)). Binary splitting evaluates
// the sum as a product tree of integer P/Q/T triples so no term is ever
// computed from scratch; `640320^3` is divisible by 24 exactly (640320 /
// 24 = 26680), so `Q`'s per-term factor is a plain integer multiply, never
// a division.
const CHUDNOVSKY_C: i64 = 640320;
const CHUDNOVSKY_C_OVER_24: i64 = 26680;
const CHUDNOVSKY_A: i64 = 13_591_409;
const CHUDNOVSKY_B: i64 = 545_140_134;

/// One leaf of the binary-splitting recursion, `a >= 1`: `P(a) = (6a-5)(2a-1)(6a-1)`,
/// `Q(a) = a^3 * 640320^3/24`, `T(a) = P(a)*(13591409 + 545140134a)`, sign-flipped
/// on odd `a`.
fn chudnovsky_leaf(a: u64) -> (BigDec, BigDec, BigDec) {
    let af = a as i64;
    let p = BigDec::from_i64(6 * af - 5)
        .mul(&BigDec::from_i64(2 * af - 1))
        .mul(&BigDec::from_i64(6 * af - 1));
    let q = BigDec::from_i64(af)
        .pow(3)
        .mul(&BigDec::from_i64(CHUDNOVSKY_C).pow(2))
        .mul(&BigDec::from_i64(CHUDNOVSKY_C_OVER_24));
    let mut t = p.mul(&BigDec::from_i64(CHUDNOVSKY_A + CHUDNOVSKY_B * af));
    if a % 2 == 1 {
        t = t.neg();
    }
    (p, q, t)
}

/// Binary-split `bs(a, b)` over the half-open term range `[a, b)`, combining
/// two sub-ranges via `P = Pam*Pmb`, `Q = Qam*Qmb`, `T = Qmb*Tam + Pam*Tmb`.
fn chudnovsky_split(a: u64, b: u64) -> (BigDec, BigDec, BigDec) {
    if b - a == 1 {
        if a == 0 {
            return (BigDec::one(), BigDec::one(), BigDec::from_i64(CHUDNOVSKY_A));
        }
        return chudnovsky_leaf(a);
    }
    let m = a + (b - a) / 2;
    let (pam, qam, tam) = chudnovsky_split(a, m);
    let (pmb, qmb, tmb) = chudnovsky_split(m, b);
    let p = pam.mul(&pmb);
    let q = qam.mul(&qmb);
    let t = qmb.mul(&tam).add(&pam.mul(&tmb));
    (p, q, t)
}

/// `pi = (426880 * sqrt(10005) * Q(0,n)) / T(0,n)`, the standard Chudnovsky
/// closed form once the binary-split product tree supplies `Q` and `T`.
/// Each term contributes roughly 14.18 decimal digits.
fn compute_pi(precision: u32) -> BigResult<BigDec> {
    let pw = precision + BUFFER_DIGITS_TRIG;
    let terms = (pw as u64 / 14) + 2;
    tracing::trace!(precision, terms, "chudnovsky binary split");
    let (_, q, t) = chudnovsky_split(0, terms);
    let sqrt_10005 = sqrt(&BigDec::from_i64(10005), pw + 20)?;
    let numerator = BigDec::from_i64(426_880).mul(&sqrt_10005).mul(&q);
    let pi = numerator.div(&t, pw)?;
    pi.round(precision, RoundingMode::HalfEven)
}

/// Reduces `x` into `(-pi, pi]` via floor-mod by `2*pi`.
fn reduce_mod_2pi(x: &BigDec, pi: &BigDec, precision: u32) -> BigResult<BigDec> {
    let two_pi = double_bigdec(pi);
    let dm = x.divmod(&two_pi, precision)?;
    let mut r = dm.remainder;
    if r > *pi {
        r = r.sub(&two_pi);
    }
    Ok(r)
}

/// Computes `(sin(r), cos(r))` jointly from one argument reduction so
/// `tan` never computes pi twice.
fn sin_cos(x: &BigDec, precision: u32, cache: &mut MathCache) -> BigResult<(BigDec, BigDec)> {
    let pw = working_precision(precision, BUFFER_DIGITS_TRIG);
    let pi = cache.pi(pw, compute_pi)?;
    let r = reduce_mod_2pi(x, &pi, pw)?;
    let r2 = r.mul(&r);

    let mut sin_term = r.clone();
    let mut sin_sum = r.clone();
    let mut cos_term = BigDec::one();
    let mut cos_sum = BigDec::one();
    let max_terms = pw as usize * 2 + 64;

    for k in 1..=max_terms {
        sin_term = sin_term.mul(&r2);
        let sin_denom = ((2 * k) * (2 * k + 1)) as u32;
        sin_term = sin_term.true_divide_inexact_by_u32(sin_denom, pw)?;
        let sin_piece = if k % 2 == 1 { sin_term.neg() } else { sin_term.clone() };

        cos_term = cos_term.mul(&r2);
        let cos_denom = ((2 * k - 1) * (2 * k)) as u32;
        cos_term = cos_term.true_divide_inexact_by_u32(cos_denom, pw)?;
        let cos_piece = if k % 2 == 1 { cos_term.neg() } else { cos_term.clone() };

        let done = is_negligible(&sin_term, pw) && is_negligible(&cos_term, pw);
        sin_sum = sin_sum.add(&sin_piece);
        cos_sum = cos_sum.add(&cos_piece);
        if done {
            break;
        }
    }

    Ok((
        sin_sum.round(precision, RoundingMode::HalfEven)?,
        cos_sum.round(precision, RoundingMode::HalfEven)?,
    ))
}

pub(crate) fn sin(x: &BigDec, precision: u32, cache: &mut MathCache) -> BigResult<BigDec> {
    Ok(sin_cos(x, precision, cache)?.0)
}

pub(crate) fn cos(x: &BigDec, precision: u32, cache: &mut MathCache) -> BigResult<BigDec> {
    Ok(sin_cos(x, precision, cache)?.1)
}

pub(crate) fn tan(x: &BigDec, precision: u32, cache: &mut MathCache) -> BigResult<BigDec> {
    let pw = working_precision(precision, BUFFER_DIGITS_TRIG);
    let (s, c) = sin_cos(x, pw, cache)?;
    if c.is_zero() {
        return Err(BigError::domain("BigDec::tan", "cosine is zero at this argument"));
    }
    s.div(&c, precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> BigDec {
        BigDec::from_str_radix10(s).unwrap()
    }

    #[test]
    fn sqrt_of_two_matches_known_digits() {
        let got = sqrt(&d("2"), 50).unwrap();
        assert_eq!(
            got.to_string_cpython(),
            "1.4142135623730950488016887242096980785696718753769"
        );
    }

    #[test]
    fn nth_root_perfect_cube() {
        assert_eq!(nth_root(&d("27"), 3, 50).unwrap(), d("3"));
        assert_eq!(nth_root(&d("8"), 3, 50).unwrap(), d("2"));
    }

    #[test]
    fn nth_root_perfect_square_needing_more_than_forty_digits_is_exact() {
        // root has 42 significant digits, well past the old 40-digit cap on
        // the perfect-power exact check.
        let root_digits = format!("1{}7", "0".repeat(40));
        let root = d(&root_digits);
        let x = root.mul(&root);
        let got = nth_root(&x, 2, 45).unwrap();
        assert_eq!(got, root);
    }

    #[test]
    fn pi_matches_known_digits() {
        let got = compute_pi(50).unwrap();
        assert_eq!(
            got.to_string_cpython(),
            "3.1415926535897932384626433832795028841971693993751"
        );
    }

    #[test]
    fn pi_binary_split_agrees_with_single_leaf_range() {
        // `chudnovsky_split(0, 1)` is the base case directly; splitting the
        // same range at an interior point must combine back to the same
        // (P, Q, T) triple.
        let (p_direct, q_direct, t_direct) = chudnovsky_split(0, 4);
        let (p_left, q_left, t_left) = chudnovsky_split(0, 2);
        let (p_right, q_right, t_right) = chudnovsky_split(2, 4);
        assert_eq!(p_direct, p_left.mul(&p_right));
        assert_eq!(q_direct, q_left.mul(&q_right));
        assert_eq!(t_direct, q_right.mul(&t_left).add(&p_left.mul(&t_right)));
    }

    #[test]
    fn sqrt_domain_error_on_negative() {
        assert!(sqrt(&d("-1"), 10).is_err());
    }

    #[test]
    fn ln_domain_error_on_nonpositive() {
        let mut cache = MathCache::new();
        assert!(ln(&d("0"), 10, &mut cache).is_err());
        assert!(ln(&d("-1"), 10, &mut cache).is_err());
    }

    #[test]
    fn exp_ln_roundtrip() {
        let mut cache = MathCache::new();
        let x = d("1.5");
        let e = exp(&x, 30).unwrap();
        let back = ln(&e, 30, &mut cache).unwrap();
        let diff = back.sub(&x);
        assert!(is_negligible(&diff, 25));
    }
}
