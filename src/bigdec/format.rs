//! CPython `Decimal.__str__`-compatible formatting.

use super::BigDec;

pub(crate) fn to_string(value: &BigDec) -> String {
    let digits = value.coefficient.to_decimal_string();
    let n_digits = digits.len() as i64;
    let exp = -value.scale;
    let adjusted = exp + n_digits - 1;

    let sign = if value.is_negative() { "-" } else { "" };

    if exp > 0 || adjusted <= -6 {
        return format!("{sign}{}", scientific(&digits, adjusted));
    }

    format!("{sign}{}", fixed_point(&digits, value.scale))
}

/// Scientific form: one leading digit, a `.` and the rest if any, then
/// `E{+|-}{adjusted}`.
fn scientific(digits: &str, adjusted: i64) -> String {
    let mut out = String::new();
    out.push_str(&digits[0..1]);
    if digits.len() > 1 {
        out.push('.');
        out.push_str(&digits[1..]);
    }
    out.push('E');
    if adjusted >= 0 {
        out.push('+');
    }
    out.push_str(&adjusted.to_string());
    out
}

/// Plain fixed-point form: insert a decimal point `scale` digits from the
/// right, padding with zeros on either side as needed. `scale <= 0` means no
/// fractional part (padding `-scale` trailing zeros onto the integer part
/// instead, and no trailing `.0`).
fn fixed_point(digits: &str, scale: i64) -> String {
    if scale <= 0 {
        let mut out = digits.to_string();
        out.push_str(&"0".repeat((-scale) as usize));
        return out;
    }
    let scale = scale as usize;
    if digits.len() > scale {
        let split = digits.len() - scale;
        format!("{}.{}", &digits[..split], &digits[split..])
    } else {
        format!("0.{}{}", "0".repeat(scale - digits.len()), digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigdec::BigDec;

    fn rt(s: &str) -> String {
        BigDec::from_str_radix10(s).unwrap().to_string_cpython()
    }

    #[test]
    fn plain_values_round_trip() {
        assert_eq!(rt("0"), "0");
        assert_eq!(rt("123"), "123");
        assert_eq!(rt("-123.456"), "-123.456");
        assert_eq!(rt("0.001"), "0.001");
    }

    #[test]
    fn scientific_for_positive_exponent() {
        assert_eq!(rt("1.23e5"), "1.23E+5");
        assert_eq!(rt("1E+5"), "1E+5");
    }

    #[test]
    fn scientific_for_very_small_magnitude() {
        assert_eq!(rt("1.5E-7"), "1.5E-7");
    }

    #[test]
    fn no_trailing_dot_zero_for_integers() {
        assert_eq!(rt("5"), "5");
        assert_eq!(rt("5.0"), "5.0");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(rt("-0"), "0");
    }
}
