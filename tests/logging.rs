//! Exercises the `tracing` instrumentation on the tier-dispatch hot paths
//! (Karatsuba/Toom-3 multiply, Burnikel-Ziegler divide, Newton iteration)
//! under an actual subscriber, installed gated by `RUST_LOG` rather than
//! always printing.

use bigdecimal_core::UBig10;

fn init_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn large_multiply_and_divide_emit_tier_dispatch_traces() {
    init_subscriber();

    let a = UBig10::from_decimal_str(&"7".repeat(2000)).unwrap();
    let b = UBig10::from_decimal_str(&"3".repeat(2000)).unwrap();
    let product = a.mul(&b);
    assert!(!product.is_zero());

    let big = UBig10::from_decimal_str(&"9".repeat(9000)).unwrap();
    let divisor = UBig10::from_decimal_str(&"13".repeat(600)).unwrap();
    let dr = big.div_rem(&divisor).unwrap();
    assert_eq!(dr.quotient.mul(&divisor).add(&dr.remainder), big);
}
