//! SBig2 magnitude multiplication: schoolbook + Karatsuba.
//!
//! Same zero-copy slice structure as `ubig10::mul`, radix `2^32` instead of
//! `10^9`; there is no Toom-3 tier here — SBig2's magnitude arithmetic is
//! scoped to Karatsuba and Knuth-D only.

use super::{add_words, is_zero_words, shift_words, sub_words, trim};
use crate::limits::SBIG2_KARATSUBA_THRESHOLD_WORDS;

pub(crate) fn multiply(a: &[u32], b: &[u32]) -> Vec<u32> {
    if is_zero_words(a) || is_zero_words(b) {
        return vec![0];
    }
    let n = a.len().max(b.len());
    if n > SBIG2_KARATSUBA_THRESHOLD_WORDS {
        karatsuba(a, b)
    } else {
        schoolbook(a, b)
    }
}

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
            result[idx] = sum as u32;
            carry = sum >> 32;
        }
        let mut k = i + nb;
        while carry > 0 {
            let sum = result[k] as u64 + carry;
            result[k] = sum as u32;
            carry = sum >> 32;
            k += 1;
        }
    }
    trim(&mut result);
    result
}

pub(crate) fn multiply_by_word(a: &[u32], d: u32) -> Vec<u32> {
    if d == 0 || is_zero_words(a) {
        return vec![0];
    }
    let d = d as u64;
    let mut result = Vec::with_capacity(a.len() + 1);
    let mut carry: u64 = 0;
    for &w in a {
        let prod = w as u64 * d + carry;
        result.push(prod as u32);
        carry = prod >> 32;
    }
    while carry > 0 {
        result.push(carry as u32);
        carry >>= 32;
    }
    trim(&mut result);
    result
}

/// Karatsuba split at `k = max(n,m)/2`, cutoff at
/// [`SBIG2_KARATSUBA_THRESHOLD_WORDS`].
pub(crate) fn karatsuba(a: &[u32], b: &[u32]) -> Vec<u32> {
    let n = a.len().max(b.len());
    if n <= SBIG2_KARATSUBA_THRESHOLD_WORDS {
        return schoolbook(a, b);
    }
    let k = n / 2;
    if a.len() <= k || b.len() <= k {
        return two_chunk(a, b, k);
    }

    let (a_lo, a_hi) = a.split_at(k);
    let (b_lo, b_hi) = b.split_at(k);

    let z0 = multiply(a_lo, b_lo);
    let z2 = multiply(a_hi, b_hi);
    let a_sum = add_words(a_lo, a_hi);
    let b_sum = add_words(b_lo, b_hi);
    let z1_full = multiply(&a_sum, &b_sum);
    let t = sub_words(&z1_full, &z0);
    let z1 = sub_words(&t, &z2);

    let mut out = add_words(&z0, &shift_words(&z1, k));
    out = add_words(&out, &shift_words(&z2, 2 * k));
    out
}

fn two_chunk(a: &[u32], b: &[u32], k: usize) -> Vec<u32> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if long.len() <= k {
        return schoolbook(a, b);
    }
    let (lo, hi) = long.split_at(k);
    let low_part = multiply(lo, short);
    let high_part = multiply(hi, short);
    add_words(&low_part, &shift_words(&high_part, k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbig2::SBig2;

    #[test]
    fn schoolbook_matches_native() {
        let a = SBig2::from_u64(123_456_789);
        let b = SBig2::from_u64(987_654_321);
        let got = a.mul(&b);
        assert_eq!(got.to_u64().unwrap(), 123_456_789u64 * 987_654_321);
    }

    #[test]
    fn karatsuba_matches_schoolbook_on_shared_range() {
        let a: Vec<u32> = (0..60u32).map(|i| i.wrapping_mul(2654435761)).collect();
        let b: Vec<u32> = (0..60u32).map(|i| i.wrapping_mul(40503).wrapping_add(7)).collect();
        let via_schoolbook = schoolbook(&a, &b);
        let via_karatsuba = karatsuba(&a, &b);
        assert_eq!(via_schoolbook, via_karatsuba);
    }
}
