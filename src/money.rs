//! Wire-format money handling.
//!
//! The mobile client sends and expects every monetary value as a plain
//! decimal-digit string ("1000000"). Internally everything is an `i64` in minor
//! units; the string representation exists only at this boundary.

use crate::error::ServiceError;

/// Parses a wire amount string into minor units.
///
/// Leading/trailing whitespace is tolerated (the client is a phone keyboard);
/// anything else that is not a plain non-negative integer is rejected.
pub fn parse_amount(s: &str) -> Result<i64, ServiceError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ServiceError::validation(format!(
            "invalid amount \"{s}\": expected a non-negative whole number"
        )));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ServiceError::validation(format!("amount \"{s}\" is out of range")))
}

/// Parses an amount that must be strictly positive (transaction amounts).
pub fn parse_positive_amount(s: &str) -> Result<i64, ServiceError> {
    let v = parse_amount(s)?;
    if v == 0 {
        return Err(ServiceError::validation("amount must be greater than zero"));
    }
    Ok(v)
}

/// Formats minor units back into the wire digit string.
pub fn format_amount(v: i64) -> String {
    v.to_string()
}

/// Thousands-grouped rendering for human-facing notification text ("1,000,000").
pub fn format_grouped(v: i64) -> String {
    let digits = v.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0 {
        out.push('-');
    }
    let first = digits.len() % 3;
    let mut rest = digits.as_str();
    if first > 0 {
        out.push_str(&rest[..first]);
        rest = &rest[first..];
        if !rest.is_empty() {
            out.push(',');
        }
    }
    let mut iter = rest.as_bytes().chunks(3).peekable();
    while let Some(chunk) = iter.next() {
        out.push_str(std::str::from_utf8(chunk).expect("ascii digits"));
        if iter.peek().is_some() {
            out.push(',');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_digit_strings() {
        assert_eq!(parse_amount("0").unwrap(), 0);
        assert_eq!(parse_amount("1000000").unwrap(), 1_000_000);
        assert_eq!(parse_amount(" 500000 ").unwrap(), 500_000);
    }

    #[test]
    fn rejects_non_digit_input() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("12.5").is_err());
        assert!(parse_amount("-3").is_err());
        assert!(parse_amount("1,000").is_err());
        assert!(parse_amount("1M").is_err());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(parse_amount("99999999999999999999").is_err());
    }

    #[test]
    fn positive_amount_rejects_zero() {
        assert!(parse_positive_amount("0").is_err());
        assert_eq!(parse_positive_amount("1").unwrap(), 1);
    }

    #[test]
    fn format_round_trips_verbatim() {
        for s in ["0", "7", "1000000", "9223372036854775807"] {
            assert_eq!(format_amount(parse_amount(s).unwrap()), s);
        }
    }

    #[test]
    fn grouped_formatting() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(999), "999");
        assert_eq!(format_grouped(1_000), "1,000");
        assert_eq!(format_grouped(1_000_000), "1,000,000");
        assert_eq!(format_grouped(40_000), "40,000");
        assert_eq!(format_grouped(-12_345), "-12,345");
    }
}
