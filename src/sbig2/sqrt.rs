//! SBig2 integer square root.
//!
//! Three tiers by word count: hardware `f64::sqrt` plus refinement for
//! tiny values, plain Newton seeded from the top two words for medium
//! values, and the CPython precision-doubling algorithm for everything
//! larger, which does `O(M(n))` total work instead of `O(M(n) log n)`.

use super::{bit_length_words, cmp_words, SBig2};
use crate::limits::{SBIG2_ISQRT_HARDWARE_THRESHOLD_WORDS, SBIG2_ISQRT_NEWTON_THRESHOLD_WORDS};

pub(crate) fn isqrt(n: &SBig2) -> SBig2 {
    debug_assert!(!n.is_negative(), "isqrt requires a non-negative operand");
    if n.is_zero() {
        return SBig2::zero();
    }
    let words = n.words.len();
    if words <= SBIG2_ISQRT_HARDWARE_THRESHOLD_WORDS {
        return SBig2::from_u64(isqrt_u64(n.to_u64().unwrap_or(u64::MAX)));
    }
    if words <= SBIG2_ISQRT_NEWTON_THRESHOLD_WORDS {
        return newton_isqrt(n);
    }
    tracing::debug!(words, "dispatching precision-doubling isqrt");
    precision_doubling_isqrt(n)
}

fn isqrt_u64(v: u64) -> u64 {
    if v < 2 {
        return v;
    }
    let mut x = (v as f64).sqrt() as u64;
    if x == 0 {
        x = 1;
    }
    loop {
        let next = (x + v / x.max(1)) / 2;
        if next >= x {
            break;
        }
        x = next;
    }
    while x > 0 && x * x > v {
        x -= 1;
    }
    while (x + 1).checked_mul(x + 1).map(|sq| sq <= v).unwrap_or(false) {
        x += 1;
    }
    x
}

/// Newton `x_{k+1} = (x_k + n/x_k) / 2`, seeded from `bit_length/2` (an
/// upper bound within a factor of 2, which Newton's quadratic convergence
/// absorbs in `O(log bits)` steps) and refined to the hardware-precision
/// top words once within range.
fn newton_isqrt(n: &SBig2) -> SBig2 {
    let bits = bit_length_words(&n.words);
    let mut x = SBig2::one().shl((bits / 2 + 1) as u32);

    for _ in 0..(bits as usize + 16) {
        let dr = match n.div_rem(&x) {
            Ok(dr) => dr,
            Err(_) => break,
        };
        let sum = x.add(&dr.quotient);
        let next = sum.shr(1);
        if next == x {
            break;
        }
        let dist = if x.cmp_mag(&next) == std::cmp::Ordering::Less {
            next.sub(&x)
        } else {
            x.sub(&next)
        };
        x = next;
        if dist.is_zero() || (dist.words.len() == 1 && dist.words[0] <= 1) {
            break;
        }
    }
    finalize(n, x)
}

/// CPython's precision-doubling isqrt: walk the bit-length down from
/// `c_bits - 1`, doubling the approximation's precision at each step via
/// `a_new = (a << shift_a) + (n >> shift_n) / a`.
fn precision_doubling_isqrt(n: &SBig2) -> SBig2 {
    let bits = bit_length_words(&n.words) as i64;
    let c = bits / 2;

    // Build the descending sequence of working precisions, halving `c`
    // each step until it reaches the hardware-seedable range.
    let mut cs = vec![c];
    let mut cur = c;
    while cur > 30 {
        cur /= 2;
        cs.push(cur);
    }
    // Seed: isqrt of the top `2*cs.last()+ (1 or 2)` bits via hardware sqrt.
    let c0 = *cs.last().unwrap();
    let seed_shift = bits - (2 * c0 + 2).min(bits);
    let top = n.shr(seed_shift.max(0) as u32);
    let mut a = SBig2::from_u64(isqrt_u64(top.to_u64().unwrap_or(1)));
    if a.is_zero() {
        a = SBig2::one();
    }
    let mut a_c = c0;

    for &next_c in cs.iter().rev().skip(1) {
        let shift_a = next_c - a_c;
        let shift_n = bits - 2 * next_c;
        let shifted_n = if shift_n >= 0 { n.shr(shift_n as u32) } else { n.shl((-shift_n) as u32) };
        let term = match shifted_n.div_rem(&a) {
            Ok(dr) => dr.quotient,
            Err(_) => SBig2::zero(),
        };
        a = a.shl(shift_a.max(0) as u32).add(&term);
        a_c = next_c;
    }

    // One final step to recover full precision if `c` wasn't already in `cs`.
    if a_c < c {
        let shift_a = c - a_c;
        let shift_n = bits - 2 * c;
        let shifted_n = if shift_n >= 0 { n.shr(shift_n as u32) } else { n.shl((-shift_n) as u32) };
        let term = match shifted_n.div_rem(&a) {
            Ok(dr) => dr.quotient,
            Err(_) => SBig2::zero(),
        };
        a = a.shl(shift_a.max(0) as u32).add(&term);
    }

    finalize(n, a)
}

/// Adjusts the Newton/precision-doubling result to the exact floor value:
/// subtract one while `a^2 > n`, add one while `(a+1)^2 <= n`.
fn finalize(n: &SBig2, mut a: SBig2) -> SBig2 {
    loop {
        let sq = a.mul(&a);
        if cmp_words(&sq.words, &n.words) == std::cmp::Ordering::Greater {
            a = a.sub(&SBig2::one());
        } else {
            break;
        }
    }
    loop {
        let next = a.add(&SBig2::one());
        let sq = next.mul(&next);
        if cmp_words(&sq.words, &n.words) != std::cmp::Ordering::Greater {
            a = next;
        } else {
            break;
        }
    }
    a
}
