//! SBig2 shifts and bitwise AND/OR/XOR with Python two's-complement
//! semantics for negative operands.

use super::{add_words, sub_words, trim, SBig2};

pub(crate) fn shl(value: &SBig2, k: u32) -> SBig2 {
    if value.is_zero() || k == 0 {
        return value.clone();
    }
    let whole_words = (k / 32) as usize;
    let bits = k % 32;
    let mut words = super::shift_words(&value.words, whole_words);
    if bits > 0 {
        let mut carry = 0u32;
        for w in words.iter_mut() {
            let new_w = (*w << bits) | carry;
            carry = *w >> (32 - bits);
            *w = new_w;
        }
        if carry != 0 {
            words.push(carry);
        }
    }
    SBig2::from_words(value.sign, words)
}

/// Arithmetic right shift: for non-negative values, a plain logical shift;
/// for negative values, floor semantics (`-5 >> 1 == -3`), matching
/// Python's `>>` on arbitrary-precision integers.
pub(crate) fn shr(value: &SBig2, k: u32) -> SBig2 {
    if value.is_zero() || k == 0 {
        return value.clone();
    }
    if !value.is_negative() {
        return SBig2::from_words(false, shr_magnitude(&value.words, k));
    }
    // floor(-m / 2^k) = -ceil(m / 2^k) = -((m + 2^k - 1) >> k)
    let one = SBig2::one();
    let bias = one.shl(k).sub(&SBig2::one());
    let biased = SBig2::from_words(false, value.words.clone()).add(&bias);
    let shifted = shr_magnitude(&biased.words, k);
    SBig2::from_words(true, shifted)
}

fn shr_magnitude(words: &[u32], k: u32) -> Vec<u32> {
    let whole_words = (k / 32) as usize;
    let bits = k % 32;
    if whole_words >= words.len() {
        return vec![0];
    }
    let mut out = words[whole_words..].to_vec();
    if bits > 0 {
        let mut carry = 0u32;
        for w in out.iter_mut().rev() {
            let new_w = (*w >> bits) | carry;
            carry = *w << (32 - bits);
            *w = new_w;
        }
    }
    trim(&mut out);
    out
}

/// Two's-complement word list, `max_len` wide, sign-extended with
/// `0xFFFF_FFFF` fill for negative operands.
fn twos_complement(value: &SBig2, max_len: usize) -> Vec<u32> {
    let mut words = value.words.clone();
    words.resize(max_len, 0);
    if value.is_negative() {
        // ~(|a|-1): subtract one from the magnitude then complement bits.
        let minus_one = sub_words(&words, &[1]);
        words = minus_one;
        words.resize(max_len, 0);
        for w in words.iter_mut() {
            *w = !*w;
        }
    }
    words
}

/// Inverse of [`twos_complement`]: recovers `(sign, magnitude)` from a
/// fixed-width two's-complement word list whose top bit carries the sign.
fn from_twos_complement(mut words: Vec<u32>, negative: bool) -> SBig2 {
    if negative {
        for w in words.iter_mut() {
            *w = !*w;
        }
        words = add_words(&words, &[1]);
    }
    trim(&mut words);
    SBig2::from_words(negative, words)
}

pub(crate) fn bitop(a: &SBig2, b: &SBig2, op: impl Fn(u32, u32) -> u32) -> SBig2 {
    // One guard word beyond the longer operand carries the infinite sign
    // extension (all-0s for non-negative, all-1s for negative).
    let len = a.words.len().max(b.words.len()) + 1;
    let aw = twos_complement(a, len);
    let bw = twos_complement(b, len);
    let out: Vec<u32> = aw.iter().zip(bw.iter()).map(|(&x, &y)| op(x, y)).collect();
    let result_negative = (out[len - 1] & 0x8000_0000) != 0;
    from_twos_complement(out, result_negative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shl_shr_roundtrip() {
        let a = SBig2::from_i64(12345);
        let shifted = a.shl(10);
        assert_eq!(shifted.shr(10), a);
    }

    #[test]
    fn shr_negative_floors() {
        // -5 >> 1 == -3 (floor division by 2), matching Python semantics.
        assert_eq!(SBig2::from_i64(-5).shr(1), SBig2::from_i64(-3));
        assert_eq!(SBig2::from_i64(-4).shr(1), SBig2::from_i64(-2));
    }

    #[test]
    fn bitand_matches_native_i64() {
        for (x, y) in [(12i64, 10i64), (-12, 10), (12, -10), (-12, -10)] {
            let got = SBig2::from_i64(x).bitand(&SBig2::from_i64(y));
            let expected = x & y;
            if expected >= 0 {
                assert_eq!(got.to_u64().unwrap() as i64, expected);
            } else {
                assert!(got.is_negative());
            }
        }
    }

    #[test]
    fn bitor_bitxor_match_native_i64() {
        for (x, y) in [(12i64, 10i64), (-12, 10), (12, -10), (-12, -10)] {
            let or_got = SBig2::from_i64(x).bitor(&SBig2::from_i64(y));
            let xor_got = SBig2::from_i64(x).bitxor(&SBig2::from_i64(y));
            let or_expected = x | y;
            let xor_expected = x ^ y;
            if or_expected >= 0 {
                assert_eq!(or_got.to_u64().unwrap() as i64, or_expected);
            }
            if xor_expected >= 0 {
                assert_eq!(xor_got.to_u64().unwrap() as i64, xor_expected);
            }
        }
    }

    #[test]
    fn not_is_negate_plus_one_identity() {
        let a = SBig2::from_i64(42);
        assert_eq!(a.not(), SBig2::from_i64(-43));
        assert_eq!(SBig2::from_i64(-1).not(), SBig2::from_i64(0));
    }

    #[test]
    fn bit_length_matches_native() {
        assert_eq!(SBig2::from_u64(0).bit_length(), 0);
        assert_eq!(SBig2::from_u64(1).bit_length(), 1);
        assert_eq!(SBig2::from_u64(255).bit_length(), 8);
        assert_eq!(SBig2::from_u64(256).bit_length(), 9);
    }
}
