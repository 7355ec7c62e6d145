//! UBig10 multiplication tier: schoolbook / Karatsuba / Toom-3.
//!
//! Dispatch is purely on operand length; every tier takes plain slices so
//! recursive calls never copy a full operand, only the newly-computed sums
//! and partial products.

use super::{add_words, is_zero_words, shift_words, sub_words, trim, UBig10};
use crate::limits::{B10, KARATSUBA_THRESHOLD_WORDS, TOOM3_THRESHOLD_WORDS};

/// Top-level dispatcher used by every recursive call site.
pub(crate) fn multiply(a: &[u32], b: &[u32]) -> Vec<u32> {
    if is_zero_words(a) || is_zero_words(b) {
        return vec![0];
    }
    let n = a.len().max(b.len());
    if n >= TOOM3_THRESHOLD_WORDS {
        tracing::trace!(a_words = a.len(), b_words = b.len(), "dispatching toom3");
        toom3(a, b)
    } else if n > KARATSUBA_THRESHOLD_WORDS {
        tracing::trace!(a_words = a.len(), b_words = b.len(), "dispatching karatsuba");
        karatsuba(a, b)
    } else {
        schoolbook(a, b)
    }
}

/// Schoolbook O(n*m) multiply: for each `i`, fold
/// `a[i]*b[0..n] + carry + result[i+j]` in a `u64`.
pub(crate) fn schoolbook(a: &[u32], b: &[u32]) -> Vec<u32> {
    let na = a.len();
    let nb = b.len();
    let mut result = vec![0u32; na + nb];
    for i in 0..na {
        if a[i] == 0 {
            continue;
        }
        let ai = a[i] as u64;
        let mut carry: u64 = 0;
        for j in 0..nb {
            let idx = i + j;
            let sum = ai * b[j] as u64 + result[idx] as u64 + carry;
            result[idx] = (sum % B10 as u64) as u32;
            carry = sum / B10 as u64;
        }
        let mut k = i + nb;
        while carry > 0 {
            let sum = result[k] as u64 + carry;
            result[k] = (sum % B10 as u64) as u32;
            carry = sum / B10 as u64;
            k += 1;
        }
    }
    trim(&mut result);
    result
}

/// Multiplies a full operand by a single word, used by base conversion,
/// Taylor-series stepping, and BigDec's scale alignment.
pub(crate) fn multiply_by_word(a: &[u32], d: u32) -> Vec<u32> {
    if d == 0 || is_zero_words(a) {
        return vec![0];
    }
    let d = d as u64;
    let mut result = Vec::with_capacity(a.len() + 1);
    let mut carry: u64 = 0;
    for &w in a {
        let prod = w as u64 * d + carry;
        result.push((prod % B10 as u64) as u32);
        carry = prod / B10 as u64;
    }
    while carry > 0 {
        result.push((carry % B10 as u64) as u32);
        carry /= B10 as u64;
    }
    trim(&mut result);
    result
}

/// Karatsuba split at `k = max(n,m)/2`; degrades to a two-chunk split if one
/// operand is shorter than `k`.
pub(crate) fn karatsuba(a: &[u32], b: &[u32]) -> Vec<u32> {
    let n = a.len().max(b.len());
    if n <= KARATSUBA_THRESHOLD_WORDS {
        return schoolbook(a, b);
    }
    let k = n / 2;

    if a.len() <= k || b.len() <= k {
        return karatsuba_two_chunk(a, b, k);
    }

    let (a_lo, a_hi) = a.split_at(k);
    let (b_lo, b_hi) = b.split_at(k);

    let z0 = multiply(a_lo, b_lo);
    let z2 = multiply(a_hi, b_hi);

    let a_sum = add_words(a_lo, a_hi);
    let b_sum = add_words(b_lo, b_hi);
    let z1_full = multiply(&a_sum, &b_sum);

    // z1 = z1_full - z0 - z2; always non-negative for valid inputs.
    let t = sub_words(&z1_full, &z0);
    let z1 = sub_words(&t, &z2);

    combine(&z0, &z1, &z2, k)
}

/// One operand shorter than the split point `k`: split only the longer one
/// into two chunks against the whole of the shorter operand.
fn karatsuba_two_chunk(a: &[u32], b: &[u32], k: usize) -> Vec<u32> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if long.len() <= k {
        return schoolbook(a, b);
    }
    let (lo, hi) = long.split_at(k);
    let low_part = multiply(lo, short);
    let high_part = multiply(hi, short);
    add_words(&low_part, &shift_words(&high_part, k))
}

fn combine(z0: &[u32], z1: &[u32], z2: &[u32], k: usize) -> Vec<u32> {
    let mut out = add_words(z0, &shift_words(z1, k));
    out = add_words(&out, &shift_words(z2, 2 * k));
    out
}

// ============================================================================
// Toom-3: five-point evaluation at {0, 1, -1, 2, inf}.
// ============================================================================

/// A signed word value used only for Toom-3's intermediate evaluations,
/// which can go negative even though the final recomposed product cannot.
/// Carrying a boolean sign bit alongside the magnitude avoids introducing a
/// public signed UBig10 type.
#[derive(Clone, Debug)]
struct Signed {
    neg: bool,
    mag: Vec<u32>,
}

impl Signed {
    fn from_unsigned(mag: Vec<u32>) -> Self {
        Signed { neg: false, mag }
    }

    fn is_zero(&self) -> bool {
        is_zero_words(&self.mag)
    }

    fn add(&self, other: &Self) -> Self {
        if self.neg == other.neg {
            Signed {
                neg: self.neg,
                mag: add_words(&self.mag, &other.mag),
            }
        } else {
            match super::cmp_words(&self.mag, &other.mag) {
                std::cmp::Ordering::Equal => Signed::from_unsigned(vec![0]),
                std::cmp::Ordering::Greater => Signed {
                    neg: self.neg,
                    mag: sub_words(&self.mag, &other.mag),
                },
                std::cmp::Ordering::Less => Signed {
                    neg: other.neg,
                    mag: sub_words(&other.mag, &self.mag),
                },
            }
        }
    }

    fn sub(&self, other: &Self) -> Self {
        self.add(&Signed {
            neg: !other.neg,
            mag: other.mag.clone(),
        })
    }

    fn mul_unsigned(&self, other: &Self) -> Self {
        Signed {
            neg: self.neg ^ other.neg,
            mag: multiply(&self.mag, &other.mag),
        }
    }

    fn mul_small(&self, d: u32) -> Self {
        Signed {
            neg: self.neg,
            mag: multiply_by_word(&self.mag, d),
        }
    }

    /// Exact division by a small constant (2, 3, or 6): a carry-based sweep
    /// over words, never a general division.
    fn div_exact_small(&self, d: u32) -> Self {
        let (q, _) = super::div::floor_divide_by_u32(&self.mag, d);
        Signed { neg: self.neg, mag: q }
    }

    fn shift(&self, k: usize) -> Self {
        Signed {
            neg: self.neg,
            mag: shift_words(&self.mag, k),
        }
    }

    fn to_unsigned(self) -> Vec<u32> {
        debug_assert!(!self.neg || self.is_zero(), "Toom-3 result must be non-negative");
        self.mag
    }
}

fn part(words: &[u32], idx: usize, k: usize) -> Vec<u32> {
    let start = idx * k;
    if start >= words.len() {
        return vec![0];
    }
    let end = (start + k).min(words.len());
    let mut v = words[start..end].to_vec();
    trim(&mut v);
    v
}

fn eval_point0(p0: &Signed) -> Signed {
    p0.clone()
}

fn eval_point1(p0: &Signed, p1: &Signed, p2: &Signed) -> Signed {
    p0.add(p1).add(p2)
}

fn eval_point_neg1(p0: &Signed, p1: &Signed, p2: &Signed) -> Signed {
    p0.sub(p1).add(p2)
}

fn eval_point2(p0: &Signed, p1: &Signed, p2: &Signed) -> Signed {
    // p0 + 2*p1 + 4*p2
    p0.add(&p1.mul_small(2)).add(&p2.mul_small(4))
}

/// Five-point Toom-3 evaluation/interpolation (Bodrato's sequence).
pub(crate) fn toom3(a: &[u32], b: &[u32]) -> Vec<u32> {
    let n = a.len().max(b.len());
    if n < TOOM3_THRESHOLD_WORDS {
        return karatsuba(a, b);
    }
    let k = n.div_ceil(3);

    let a0 = Signed::from_unsigned(part(a, 0, k));
    let a1 = Signed::from_unsigned(part(a, 1, k));
    let a2 = Signed::from_unsigned(part(a, 2, k));
    let b0 = Signed::from_unsigned(part(b, 0, k));
    let b1 = Signed::from_unsigned(part(b, 1, k));
    let b2 = Signed::from_unsigned(part(b, 2, k));

    let pa0 = eval_point0(&a0);
    let pa1 = eval_point1(&a0, &a1, &a2);
    let pam1 = eval_point_neg1(&a0, &a1, &a2);
    let pa2 = eval_point2(&a0, &a1, &a2);
    let pinf_a = a2.clone();

    let pb0 = eval_point0(&b0);
    let pb1 = eval_point1(&b0, &b1, &b2);
    let pbm1 = eval_point_neg1(&b0, &b1, &b2);
    let pb2 = eval_point2(&b0, &b1, &b2);
    let pinf_b = b2.clone();

    let r0 = pa0.mul_unsigned(&pb0);
    let r1 = pa1.mul_unsigned(&pb1);
    let rm1 = pam1.mul_unsigned(&pbm1);
    let r2 = pa2.mul_unsigned(&pb2);
    let rinf = pinf_a.mul_unsigned(&pinf_b);

    // Interpolation: solve the 5x5 Vandermonde system at {0,1,-1,2,inf}
    // directly for c1..c3 (c0, c4 fall straight out of v0, vinf).
    //   c2 = (v1+vm1)/2 - v0 - vinf
    //   c3 = (v2 + 3*v0 - 3*v1 - vm1 - 12*vinf) / 6
    //   c1 = (v1-vm1)/2 - c3
    let w0 = r0.clone();
    let w4 = rinf.clone();
    let w2 = r1.add(&rm1).div_exact_small(2).sub(&w0).sub(&w4);
    let w3 = r2
        .add(&w0.mul_small(3))
        .sub(&r1.mul_small(3))
        .sub(&rm1)
        .sub(&w4.mul_small(12))
        .div_exact_small(6);
    let w1 = r1.sub(&rm1).div_exact_small(2).sub(&w3);

    let mut acc = Signed::from_unsigned(w0.to_unsigned());
    acc = acc.add(&w1.shift(k));
    acc = acc.add(&w2.shift(2 * k));
    acc = acc.add(&w3.shift(3 * k));
    acc = acc.add(&w4.shift(4 * k));

    let mut out = acc.to_unsigned();
    trim(&mut out);
    out
}

// ============================================================================
// Scalar ten-power scaling — the only operations used to align scales in
// BigDec arithmetic.
// ============================================================================

pub(crate) fn multiply_by_power_of_ten(value: &UBig10, k: u64) -> UBig10 {
    if k == 0 || value.is_zero() {
        return value.clone();
    }
    let whole_words = (k / 9) as usize;
    let remainder = (k % 9) as u32;
    let mut words = shift_words(&value.words, whole_words);
    if remainder > 0 {
        let factor = 10u32.pow(remainder);
        words = multiply_by_word(&words, factor);
    }
    UBig10::from_words(words)
}
