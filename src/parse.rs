//! Shared decimal string parsing.
//!
//! One grammar backs both [`crate::ubig10::UBig10`]'s integer parsing and
//! [`crate::bigdec::BigDec`]'s full decimal parsing: optional sign, optional
//! digit-group separators (`_`, `,`, ` `), an integer part, an optional
//! fractional part, and an optional `e`/`E` exponent.

use crate::error::BigError;

/// The parsed pieces of a decimal literal: the significant digits (no
/// separators, no leading zeros beyond a single `0`), the scale (`> 0` for
/// fractional input, `< 0` when a positive exponent demands trailing zeros),
/// and the sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDecimal {
    pub digits: String,
    pub scale: i64,
    pub negative: bool,
}

/// Parses a decimal literal.
///
/// Accepts: `[+-]? digit_group+ ('.' digit_group*)? ([eE] [+-]? digit+)?`
/// where `digit_group` is a run of ASCII digits optionally interspersed with
/// `_`, `,`, or ` ` separators.
pub fn parse_decimal(input: &str) -> Result<ParsedDecimal, BigError> {
    let op = "parse_decimal";
    let s = input.trim();
    if s.is_empty() {
        return Err(BigError::conversion(op, input, "empty input"));
    }

    let bytes = s.as_bytes();
    let mut i = 0usize;
    let negative = match bytes[0] {
        b'+' => {
            i += 1;
            false
        }
        b'-' => {
            i += 1;
            true
        }
        _ => false,
    };

    let mut int_digits = String::new();
    while i < bytes.len() && (bytes[i].is_ascii_digit() || is_separator(bytes[i])) {
        if bytes[i].is_ascii_digit() {
            int_digits.push(bytes[i] as char);
        }
        i += 1;
    }

    let mut frac_digits = String::new();
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && (bytes[i].is_ascii_digit() || is_separator(bytes[i])) {
            if bytes[i].is_ascii_digit() {
                frac_digits.push(bytes[i] as char);
            }
            i += 1;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(BigError::conversion(op, input, "no digits found"));
    }

    let mut exponent: i64 = 0;
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        let exp_negative = match bytes.get(i) {
            Some(b'+') => {
                i += 1;
                false
            }
            Some(b'-') => {
                i += 1;
                true
            }
            _ => false,
        };
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return Err(BigError::conversion(op, input, "missing exponent digits"));
        }
        let exp_str = &s[exp_start..i];
        let magnitude: i64 = exp_str
            .parse()
            .map_err(|_| BigError::conversion(op, input, "exponent out of range"))?;
        exponent = if exp_negative { -magnitude } else { magnitude };
    }

    if i != bytes.len() {
        return Err(BigError::conversion(
            op,
            input,
            format!("unexpected trailing character {:?}", bytes[i] as char),
        ));
    }

    if int_digits.is_empty() {
        int_digits.push('0');
    }

    // scale before applying the exponent: number of fractional digits typed.
    let typed_scale = frac_digits.len() as i64;
    let mut digits = int_digits;
    digits.push_str(&frac_digits);

    // scale = typed_scale - exponent; exponent > 0 shifts the decimal point
    // right (scale down, possibly negative => trailing zeros to materialize).
    let scale = typed_scale - exponent;

    strip_leading_zeros(&mut digits);

    Ok(ParsedDecimal {
        digits,
        scale,
        negative,
    })
}

fn is_separator(b: u8) -> bool {
    b == b'_' || b == b',' || b == b' '
}

fn strip_leading_zeros(digits: &mut String) {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        *digits = "0".to_string();
    } else if trimmed.len() != digits.len() {
        *digits = trimmed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_integer() {
        let p = parse_decimal("123").unwrap();
        assert_eq!(p.digits, "123");
        assert_eq!(p.scale, 0);
        assert!(!p.negative);
    }

    #[test]
    fn negative_fraction() {
        let p = parse_decimal("-10.5").unwrap();
        assert_eq!(p.digits, "105");
        assert_eq!(p.scale, 1);
        assert!(p.negative);
    }

    #[test]
    fn scientific_notation_positive_exponent() {
        let p = parse_decimal("1.23e5").unwrap();
        assert_eq!(p.digits, "123");
        assert_eq!(p.scale, -3);
    }

    #[test]
    fn scientific_notation_negative_exponent() {
        let p = parse_decimal("1.5E-7").unwrap();
        assert_eq!(p.digits, "15");
        assert_eq!(p.scale, 8);
    }

    #[test]
    fn digit_separators() {
        let p = parse_decimal("1_000_000.25").unwrap();
        assert_eq!(p.digits, "100000025");
        assert_eq!(p.scale, 2);
    }

    #[test]
    fn rejects_empty() {
        assert!(parse_decimal("").is_err());
        assert!(parse_decimal("   ").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_decimal("12x3").is_err());
        assert!(parse_decimal("abc").is_err());
    }
}
