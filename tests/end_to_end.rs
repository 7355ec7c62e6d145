//! End-to-end scenarios spanning the public API: parse, compute, format.

use bigdecimal_core::{BigDec, MathCache, RoundingMode, UBig10};

fn d(s: &str) -> BigDec {
    BigDec::from_str_radix10(s).unwrap()
}

#[test]
fn large_integer_divided_by_one_is_identity() {
    let got = d("79228162514264337593543950335").div(&d("1"), 50).unwrap();
    assert_eq!(got.to_string_cpython(), "79228162514264337593543950335");
}

#[test]
fn one_third_to_fifty_digits() {
    let got = d("1").div(&d("3"), 50).unwrap();
    assert_eq!(got.to_string_cpython(), "0.33333333333333333333333333333333333333333333333333");
}

#[test]
fn sqrt_two_to_fifty_digits() {
    let got = d("2").sqrt(50).unwrap();
    assert_eq!(got.to_string_cpython(), "1.4142135623730950488016887242096980785696718753769");
}

#[test]
fn nth_root_perfect_cubes() {
    assert_eq!(d("27").root(3, 50).unwrap().to_string_cpython(), "3");
    assert_eq!(d("8").root(3, 50).unwrap().to_string_cpython(), "2");
}

#[test]
fn dividing_far_larger_divisor_stays_fast_and_truncates() {
    let a = UBig10::from_decimal_str(&"9".repeat(65536 * 9)).unwrap();
    let b = UBig10::from_decimal_str(&"3".repeat(32768 * 9)).unwrap();
    let dr = a.div_rem(&b).unwrap();
    assert!(!dr.quotient.is_zero());
}

#[test]
fn scientific_round_trip_exact_format() {
    let parsed = BigDec::from_str_radix10("1.23e5").unwrap();
    assert_eq!(parsed.to_string_cpython(), "1.23E+5");
}

#[test]
fn floor_div_and_mod_satisfy_recovery_identity() {
    let a = d("10.5");
    let b = d("3.2");
    let dm = a.divmod(&b, 30).unwrap();
    assert_eq!(dm.quotient.to_string_cpython(), "3");
    assert_eq!(dm.remainder.to_string_cpython(), "0.9");
    assert_eq!(dm.quotient.mul(&b).add(&dm.remainder), a);
}

#[test]
fn up_mode_rounds_minus_0_9_to_minus_1_at_zero_places() {
    let got = d("-0.9").quantize(0, RoundingMode::Up).unwrap();
    assert_eq!(got.to_string_cpython(), "-1");
}

#[test]
fn scientific_notation_not_collapsed_to_plain_form() {
    assert_eq!(d("1E+5").to_string_cpython(), "1E+5");
    assert_eq!(d("1.5E-7").to_string_cpython(), "1.5E-7");
}

#[test]
fn exact_division_has_no_trailing_zero_padding() {
    let got = d("10").div(&d("5"), 50).unwrap();
    assert_eq!(got.to_string_cpython(), "2");
}

#[test]
fn string_round_trip_preserves_value() {
    for s in ["0", "123.456", "-0.001", "1.23E+5", "1.5E-7", "1000000"] {
        let parsed = BigDec::from_str_radix10(s).unwrap();
        let formatted = parsed.to_string_cpython();
        let reparsed = BigDec::from_str_radix10(&formatted).unwrap();
        assert_eq!(parsed, reparsed, "round trip failed for {s}");
    }
}

#[test]
fn exp_and_ln_are_mutual_inverses() {
    let mut cache = MathCache::new();
    let x = d("2.5");
    let via_exp = x.exp(40).unwrap().ln(40, &mut cache).unwrap();
    let diff = via_exp.sub(&x).abs();
    assert!(diff.compare_absolute(&d("1e-35")) != std::cmp::Ordering::Greater);
}

#[test]
fn additive_and_multiplicative_identities_hold() {
    let a = d("123456789.987654321");
    assert_eq!(a.add(&a.neg()), BigDec::zero());
    assert_eq!(a.mul(&BigDec::one()), a);
}
