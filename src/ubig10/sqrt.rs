//! UBig10 integer square root.
//!
//! Small values get a pure-`UBig10` Newton refinement seeded from an `f64`
//! approximation of the top two words. Very large magnitudes hand off to
//! [`crate::sbig2`]'s precision-doubling isqrt, which is asymptotically
//! better, and convert the result back.

use super::UBig10;

/// Above this many words, isqrt is cheaper via SBig2's precision-doubling
/// algorithm than via repeated big-decimal Newton steps.
const SBIG2_HANDOFF_WORDS: usize = 20;

pub(crate) fn isqrt(value: &UBig10) -> UBig10 {
    if value.is_zero() {
        return UBig10::zero();
    }
    if value.words.len() <= 2 {
        let v = value.to_u64().unwrap_or(u64::MAX);
        return UBig10::from_u64(isqrt_u64(v));
    }
    if value.words.len() > SBIG2_HANDOFF_WORDS {
        let bin = crate::sbig2::SBig2::from_ubig10(value);
        let root = bin.isqrt();
        return root.to_ubig10();
    }
    newton_isqrt(value)
}

fn isqrt_u64(v: u64) -> u64 {
    if v < 2 {
        return v;
    }
    let mut x = (v as f64).sqrt() as u64;
    // f64 sqrt can be off by one at this magnitude; nudge with integer
    // Newton steps until it brackets correctly.
    loop {
        if x == 0 {
            x = 1;
        }
        let next = (x + v / x) / 2;
        if next >= x {
            break;
        }
        x = next;
    }
    while x * x > v {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= v {
        x += 1;
    }
    x
}

/// Newton iteration `x_{k+1} = (x_k + n/x_k) / 2` entirely in `UBig10`,
/// seeded from an `f64` approximation of the top digits: `n ~ mantissa *
/// 10^exponent`, so `sqrt(n) ~ sqrt(mantissa * 10^(exponent%2)) *
/// 10^(exponent/2)`.
fn newton_isqrt(n: &UBig10) -> UBig10 {
    let decimal = n.to_decimal_string();
    let digits = decimal.len();
    let mantissa_digits = digits.min(15);
    let mantissa: f64 = decimal[..mantissa_digits].parse().unwrap_or(1.0);
    let exponent = digits - mantissa_digits;
    let half_exp = exponent / 2;
    let odd = exponent % 2;
    let seed_sqrt = (mantissa * 10f64.powi(odd as i32)).sqrt();
    let seed_str = format!("{:.0}", seed_sqrt.max(1.0));
    let mut x = match UBig10::from_decimal_str(&seed_str) {
        Ok(b) if half_exp > 0 => b.multiply_by_power_of_ten(half_exp as u64),
        Ok(b) => b,
        Err(_) => UBig10::one(),
    };
    if x.is_zero() {
        x = UBig10::one();
    }

    // Newton refinement using UBig10 division; converges quadratically and
    // a handful of iterations suffice even started from a rough seed.
    let max_iters = 64 + digits;
    for _ in 0..max_iters {
        let dr = match n.div_rem(&x) {
            Ok(dr) => dr,
            Err(_) => break,
        };
        let sum = x.add(&dr.quotient);
        let (next, _) = sum.floor_divide_by_u32(2).unwrap_or((x.clone(), 0));
        if next == x {
            break;
        }
        let prev_dist = if x.cmp_mag(&next) == std::cmp::Ordering::Less {
            next.sub(&x)
        } else {
            x.sub(&next)
        };
        x = next;
        if prev_dist.is_zero() {
            break;
        }
        if prev_dist.words().len() == 1 && prev_dist.words()[0] <= 1 {
            // oscillating by one ULP; settle on the floor value below.
            break;
        }
    }

    // Final adjustment: Newton on integers converges to floor(sqrt(n)) or
    // one above it; settle by direct comparison.
    loop {
        let sq = x.mul(&x);
        if sq.cmp_mag(n) == std::cmp::Ordering::Greater {
            x = x.sub(&UBig10::one());
        } else {
            break;
        }
    }
    loop {
        let next = x.add(&UBig10::one());
        let sq = next.mul(&next);
        if sq.cmp_mag(n) != std::cmp::Ordering::Greater {
            x = next;
        } else {
            break;
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isqrt_small_values() {
        for v in [0u64, 1, 2, 3, 4, 15, 16, 17, 1_000_000, 999_999_999] {
            let expected = (v as f64).sqrt() as u64;
            let got = UBig10::from_u64(v).isqrt();
            // brute-force the exact floor sqrt for the oracle
            let mut e = expected;
            while e * e > v {
                e -= 1;
            }
            while (e + 1) * (e + 1) <= v {
                e += 1;
            }
            assert_eq!(got.to_u64().unwrap(), e, "isqrt({v})");
        }
    }

    #[test]
    fn isqrt_of_perfect_square_large() {
        let root = UBig10::from_decimal_str(&"3".repeat(40)).unwrap();
        let squared = root.mul(&root);
        let got = squared.isqrt();
        assert_eq!(got, root);
    }

    #[test]
    fn isqrt_floors_non_perfect_square() {
        let n = UBig10::from_u64(10);
        let got = n.isqrt();
        assert_eq!(got.to_u64().unwrap(), 3);
    }
}
