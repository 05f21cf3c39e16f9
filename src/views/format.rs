//! Number formatting for display
//!
//! Matches en-US `toLocaleString`: comma thousands separators, at most three
//! fraction digits, trailing zeros dropped.

/// Format with thousands separators, e.g. `1234567.891` → `"1,234,567.891"`
///
/// Rounds half away from zero on the shortest decimal form of `value`, so
/// `0.0625` gives `"0.063"`. A negative value that rounds to zero keeps its
/// sign (`"-0"`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let (int_part, frac_part) = round_fraction(value.abs(), MAX_FRACTION_DIGITS);
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + 5);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

const MAX_FRACTION_DIGITS: usize = 3;

/// Integer and fraction digits of a non-negative finite `value`, rounded to
/// at most `digits` fraction digits
fn round_fraction(value: f64, digits: usize) -> (String, String) {
    // `Display` for f64 is the shortest round-trip form and never uses an
    // exponent
    let shortest = value.to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));
    if frac_part.len() <= digits {
        return (int_part.to_string(), frac_part.to_string());
    }

    let round_up = frac_part.as_bytes()[digits] >= b'5';
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();
    if round_up {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - digits;
    let frac = kept.split_off(split);
    (
        String::from_utf8_lossy(&kept).into_owned(),
        String::from_utf8_lossy(&frac).into_owned(),
    )
}

/// Plain number as a script runtime prints it: no grouping, no trailing `.0`
pub fn plain_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1_000.0), "1,000");
        assert_eq!(format_number(50_000.0), "50,000");
        assert_eq!(format_number(1_234_567.0), "1,234,567");
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(19.99), "19.99");
        assert_eq!(format_number(0.12345), "0.123");
        assert_eq!(format_number(2.0004), "2");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_number(-1_500.25), "-1,500.25");
        assert_eq!(format_number(-0.0001), "-0");
        assert_eq!(format_number(-0.0625), "-0.063");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_number(0.0625), "0.063");
        assert_eq!(format_number(1.0625), "1.063");
        assert_eq!(format_number(1.0005), "1.001");
        assert_eq!(format_number(2.0015), "2.002");
    }

    #[test]
    fn test_rounding_carries_into_integer_part() {
        assert_eq!(format_number(0.9996), "1");
        assert_eq!(format_number(999.9995), "1,000");
        assert_eq!(format_number(99_999.99951), "100,000");
    }

    #[test]
    fn test_tiny_values() {
        assert_eq!(format_number(0.0000001), "0");
        assert_eq!(format_number(0.0004), "0");
        assert_eq!(format_number(0.0005), "0.001");
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(plain_number(12.0), "12");
        assert_eq!(plain_number(12.5), "12.5");
        assert_eq!(plain_number(-3.0), "-3");
    }
}
