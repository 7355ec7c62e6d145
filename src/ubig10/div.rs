//! UBig10 division: single-word sweep, schoolbook long division, and
//! Burnikel-Ziegler recursive division.

use std::cmp::Ordering;

use super::mul::{multiply, multiply_by_word};
use super::{add_words, cmp_words, is_zero_words, sub_words, trim, UBig10};
use crate::error::{BigError, BigResult};
use crate::limits::{B10, BURNIKEL_ZIEGLER_THRESHOLD_WORDS};

/// Result of [`UBig10::div_rem`]: a sum-typed quotient+remainder pair
/// instead of an out-parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivRem {
    pub quotient: UBig10,
    pub remainder: UBig10,
}

/// Single downward sweep with a `u64` accumulator; the fast path used
/// wherever the divisor fits in a word.
pub(crate) fn floor_divide_by_u32(words: &[u32], d: u32) -> (Vec<u32>, u32) {
    debug_assert!(d != 0, "floor_divide_by_u32 requires a non-zero divisor");
    let mut quotient = vec![0u32; words.len()];
    let mut rem: u64 = 0;
    for i in (0..words.len()).rev() {
        let cur = rem * B10 as u64 + words[i] as u64;
        quotient[i] = (cur / d as u64) as u32;
        rem = cur % d as u64;
    }
    trim(&mut quotient);
    (quotient, rem as u32)
}

pub(crate) fn floor_divide_by_power_of_billion(value: &UBig10, k: usize) -> UBig10 {
    if k >= value.words.len() {
        return UBig10::zero();
    }
    UBig10::from_words(value.words[k..].to_vec())
}

pub(crate) fn div_rem(a: &UBig10, b: &UBig10) -> BigResult<DivRem> {
    if b.is_zero() {
        return Err(BigError::division_by_zero("UBig10::div_rem"));
    }
    let (q, r) = div_rem_words_plain(&a.words, &b.words);
    Ok(DivRem {
        quotient: UBig10::from_words(q),
        remainder: UBig10::from_words(r),
    })
}

/// General `a / b` over plain word slices, dispatching schoolbook vs.
/// Burnikel-Ziegler purely on the divisor's length. `b` must be non-zero;
/// callers outside the `UBig10` struct (base-conversion's D&C split) hold
/// that invariant by construction.
pub(crate) fn div_rem_words_plain(a: &[u32], b: &[u32]) -> (Vec<u32>, Vec<u32>) {
    if cmp_words(a, b) == Ordering::Less {
        let mut r = a.to_vec();
        trim(&mut r);
        return (vec![0], r);
    }
    if trimmed_len(b) == 1 {
        let (q, r) = floor_divide_by_u32(a, b[0]);
        return (q, vec![r]);
    }
    if b.len() >= BURNIKEL_ZIEGLER_THRESHOLD_WORDS {
        tracing::debug!(dividend_words = a.len(), divisor_words = b.len(), "dispatching burnikel-ziegler division");
        burnikel_ziegler_div(a, b)
    } else {
        schoolbook_div(a, b)
    }
}

fn trimmed_len(words: &[u32]) -> usize {
    let mut end = words.len();
    while end > 1 && words[end - 1] == 0 {
        end -= 1;
    }
    end
}

/// Schoolbook long division, Knuth-Algorithm-D style quotient-digit
/// estimation generalized to radix `B10` words: normalize so the divisor's
/// top word is at least `B10/2`, estimate each quotient digit from the top
/// two-or-three remainder words, refine, multiply-subtract, and add back on
/// underflow.
pub(crate) fn schoolbook_div(a: &[u32], b: &[u32]) -> (Vec<u32>, Vec<u32>) {
    if b.len() == 1 {
        let (q, r) = floor_divide_by_u32(a, b[0]);
        return (q, vec![r]);
    }
    if cmp_words(a, b) == Ordering::Less {
        return (vec![0], a.to_vec());
    }

    let n = b.len();
    let top = b[n - 1];
    let factor = (B10 as u64 / (top as u64 + 1)).max(1) as u32;

    let bn = multiply_by_word(b, factor);
    debug_assert!(bn.len() == n, "normalization must not change divisor length");
    let mut an = multiply_by_word(a, factor);
    an.push(0); // guarantee a leading zero word for the Knuth window

    let an_len = an.len();
    let m = an_len - n; // number of quotient digits
    let mut quotient = vec![0u32; m];

    let bn_top = bn[n - 1] as u64;
    let bn_top2 = if n >= 2 { bn[n - 2] as u64 } else { 0 };

    for j in (0..m).rev() {
        let top2 = (an[j + n] as u64) * B10 as u64 + an[j + n - 1] as u64;
        let mut qhat = (top2 / bn_top).min(B10 as u64 - 1);
        let mut rhat = top2 - qhat * bn_top;

        while rhat < B10 as u64
            && n >= 2
            && qhat * bn_top2 > rhat * B10 as u64 + an[j + n - 2] as u64
        {
            qhat -= 1;
            rhat += bn_top;
        }

        let mut borrow: i64 = 0;
        let mut carry: u64 = 0;
        for i in 0..n {
            let p = qhat * bn[i] as u64 + carry;
            carry = p / B10 as u64;
            let p_lo = (p % B10 as u64) as i64;
            let mut d = an[j + i] as i64 - p_lo - borrow;
            if d < 0 {
                d += B10 as i64;
                borrow = 1;
            } else {
                borrow = 0;
            }
            an[j + i] = d as u32;
        }
        let mut top_cell = an[j + n] as i64 - carry as i64 - borrow;
        let mut underflow = false;
        if top_cell < 0 {
            top_cell += B10 as i64;
            underflow = true;
        }
        an[j + n] = top_cell as u32;

        if underflow {
            qhat -= 1;
            let mut carry2: u64 = 0;
            for i in 0..n {
                let s = an[j + i] as u64 + bn[i] as u64 + carry2;
                if s >= B10 as u64 {
                    an[j + i] = (s - B10 as u64) as u32;
                    carry2 = 1;
                } else {
                    an[j + i] = s as u32;
                    carry2 = 0;
                }
            }
            an[j + n] = ((an[j + n] as u64 + carry2) % B10 as u64) as u32;
        }

        quotient[j] = qhat as u32;
    }

    trim(&mut quotient);
    let mut rem_normalized = an[0..n].to_vec();
    trim(&mut rem_normalized);
    let (rem, _) = floor_divide_by_u32(&rem_normalized, factor);
    (quotient, rem)
}

// ============================================================================
// Burnikel-Ziegler recursive division.
// ============================================================================

fn pad_to(words: &[u32], len: usize) -> Vec<u32> {
    let mut v = words.to_vec();
    while v.len() < len {
        v.push(0);
    }
    v
}

fn concat(low: &[u32], high: &[u32]) -> Vec<u32> {
    let mut v = low.to_vec();
    v.extend_from_slice(high);
    v
}

fn concat3(low: &[u32], mid: &[u32], high: &[u32]) -> Vec<u32> {
    let mut v = low.to_vec();
    v.extend_from_slice(mid);
    v.extend_from_slice(high);
    v
}

pub(crate) fn burnikel_ziegler_div(a: &[u32], b: &[u32]) -> (Vec<u32>, Vec<u32>) {
    let n = b.len();
    if is_zero_words(a) {
        return (vec![0], vec![0]);
    }
    if cmp_words(a, b) == Ordering::Less {
        return (vec![0], a.to_vec());
    }
    if n < BURNIKEL_ZIEGLER_THRESHOLD_WORDS {
        return schoolbook_div(a, b);
    }

    let total_len = a.len();
    let num_chunks = total_len.div_ceil(n).max(1);

    let mut rem: Vec<u32> = vec![0];
    let mut quotient_chunks_high_to_low: Vec<Vec<u32>> = Vec::with_capacity(num_chunks);

    for i in (0..num_chunks).rev() {
        let start = i * n;
        let end = (start + n).min(total_len);
        let mut chunk = if start < total_len {
            a[start..end].to_vec()
        } else {
            vec![0]
        };
        while chunk.len() < n {
            chunk.push(0);
        }

        let dividend_piece = add_words(&super::shift_words(&rem, n), &chunk);
        let (q_piece, r_piece) = div_2n1n(&dividend_piece, b);
        let mut qp = q_piece;
        while qp.len() < n {
            qp.push(0);
        }
        quotient_chunks_high_to_low.push(qp);
        rem = r_piece;
    }

    let mut q = Vec::with_capacity(n * num_chunks);
    for qp in quotient_chunks_high_to_low.into_iter().rev() {
        q.extend(qp);
    }
    trim(&mut q);
    let mut r = rem;
    trim(&mut r);
    (q, r)
}

/// `2n / n -> (n, n)` division, recursing into two `3n/2n` sub-problems
/// each halving the block size again (Burnikel-Ziegler).
fn div_2n1n(a: &[u32], b: &[u32]) -> (Vec<u32>, Vec<u32>) {
    let n0 = b.len();
    if n0 < BURNIKEL_ZIEGLER_THRESHOLD_WORDS || n0 < 2 {
        return schoolbook_div(a, b);
    }

    let n = if n0 % 2 == 0 { n0 } else { n0 + 1 };
    let b_p = pad_to(b, n);
    let a_p = pad_to(a, 2 * n);
    let half = n / 2;

    let b0 = b_p[0..half].to_vec();
    let b1 = b_p[half..n].to_vec();
    let a0 = a_p[0..half].to_vec();
    let a1 = a_p[half..2 * half].to_vec();
    let a2 = a_p[2 * half..3 * half].to_vec();
    let a3 = a_p[3 * half..4 * half].to_vec();

    let upper_dividend = concat3(&a1, &a2, &a3);
    let (q1, r1) = div_3n2n(&upper_dividend, &b1, &b0, half);

    let lower_dividend = concat(&a0, &r1);
    let (q0, r) = div_3n2n(&lower_dividend, &b1, &b0, half);

    let q1p = pad_to(&q1, half);
    let q0p = pad_to(&q0, half);
    let mut q = concat(&q0p, &q1p);
    trim(&mut q);
    let mut rr = r;
    trim(&mut rr);
    (q, rr)
}

/// `3n/2n -> (n, 2n)` division, the Burnikel-Ziegler base reduction step.
fn div_3n2n(a: &[u32], b1: &[u32], b0: &[u32], half: usize) -> (Vec<u32>, Vec<u32>) {
    let a0 = a.get(0..half).unwrap_or(&[]).to_vec();
    let a1 = a.get(half..2 * half).unwrap_or(&[]).to_vec();
    let a2 = a.get(2 * half..3 * half).unwrap_or(&[]).to_vec();
    let a0 = pad_to(&a0, half);
    let a1 = pad_to(&a1, half);
    let a2 = pad_to(&a2, half);

    let a2a1 = concat(&a1, &a2);

    let (mut q, r1) = if cmp_words(&a2, b1) == Ordering::Less {
        div_2n1n(&a2a1, b1)
    } else {
        let q_max = vec![B10 - 1; half];
        let qb1 = multiply(&q_max, b1);
        let r1 = sub_words(&a2a1, &qb1);
        (q_max, r1)
    };

    let mut r = concat(&a0, &r1);
    loop {
        let d = multiply(&q, b0);
        if cmp_words(&r, &d) != Ordering::Less {
            r = sub_words(&r, &d);
            break;
        }
        q = sub_words(&q, &[1]);
        let b_full = concat(b0, b1);
        r = add_words(&r, &b_full);
    }

    trim(&mut q);
    trim(&mut r);
    (q, r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ubig10::UBig10;

    #[test]
    fn floor_divide_by_u32_matches_native() {
        let (q, r) = floor_divide_by_u32(&UBig10::from_u64(1_000_000_007).words, 7);
        assert_eq!(q, UBig10::from_u64(1_000_000_007 / 7).words);
        assert_eq!(r, 1_000_000_007 % 7);
    }

    #[test]
    fn schoolbook_div_matches_native() {
        let a = UBig10::from_u64(123_456_789_012_345);
        let b = UBig10::from_u64(98_765_432_1);
        let dr = a.div_rem(&b).unwrap();
        assert_eq!(dr.quotient.to_u64().unwrap(), 123_456_789_012_345 / 98_765_432_1);
        assert_eq!(dr.remainder.to_u64().unwrap(), 123_456_789_012_345 % 98_765_432_1);
    }

    #[test]
    fn div_by_zero_errors() {
        let a = UBig10::from_u64(5);
        let z = UBig10::zero();
        assert!(a.div_rem(&z).is_err());
    }

    #[test]
    fn quotient_times_divisor_plus_remainder_recovers_dividend() {
        let a = UBig10::from_decimal_str(&"7".repeat(500)).unwrap();
        let b = UBig10::from_decimal_str(&"3".repeat(50)).unwrap();
        let dr = a.div_rem(&b).unwrap();
        let recovered = dr.quotient.mul(&b).add(&dr.remainder);
        assert_eq!(recovered, a);
    }

    #[test]
    fn burnikel_ziegler_matches_schoolbook_on_large_operands() {
        let a_digits: String = (0..2000).map(|i| char::from(b'0' + ((i * 7 + 3) % 10) as u8)).collect();
        let b_digits: String = (0..400).map(|i| char::from(b'0' + ((i * 11 + 5) % 10) as u8)).collect();
        let a = UBig10::from_decimal_str(&a_digits).unwrap();
        let b = UBig10::from_decimal_str(&b_digits).unwrap();

        let (q_bz, r_bz) = burnikel_ziegler_div(&a.words, &b.words);
        let (q_school, r_school) = schoolbook_div(&a.words, &b.words);
        assert_eq!(q_bz, q_school);
        assert_eq!(r_bz, r_school);
    }
}
