//! Number and duration formatting
//!
//! Turns raw metric values into the strings shown on the display.

use num_bigint::BigUint;

/// Seconds in a minute, hour, day and (365-day) year.
const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const YEAR: f64 = 31_536_000.0;

/// Anything at or above ten thousand years lands in the final bucket.
const CENTURIES_THRESHOLD: f64 = 315_360_000_000.0;

/// Marker shown for crack times past the last bucket
pub const CENTURIES_MARKER: &str = "Centuries or longer";

/// Largest integer an `f64` represents exactly (2^53)
const EXACT_INTEGER_LIMIT: u64 = 1 << 53;

/// Format a duration in seconds into a bucketed human-readable string.
///
/// Negative, NaN and infinite inputs are treated as the centuries bucket.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return CENTURIES_MARKER.to_string();
    }

    if seconds < MINUTE {
        format!("{:.2} seconds", seconds)
    } else if seconds < HOUR {
        format!("{} minutes", (seconds / MINUTE).floor() as u64)
    } else if seconds < DAY {
        format!("{} hours", (seconds / HOUR).floor() as u64)
    } else if seconds < YEAR {
        format!("{} days", (seconds / DAY).floor() as u64)
    } else if seconds < CENTURIES_THRESHOLD {
        format!("{:.2} years", seconds / YEAR)
    } else {
        CENTURIES_MARKER.to_string()
    }
}

/// Format real elapsed time for the progress timer
pub fn format_elapsed(seconds: f64) -> String {
    format!("{:.2}s", seconds)
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Format a combination count: grouped decimal up to 2^53, scientific above.
pub fn format_combinations(n: &BigUint) -> String {
    if *n > BigUint::from(EXACT_INTEGER_LIMIT) {
        format_scientific(&n.to_string())
    } else {
        group_digits(&n.to_string())
    }
}

fn group_digits(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Normalized `d.dde+N` notation from a decimal digit string, rounding half up.
fn format_scientific(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut exponent = bytes.len().saturating_sub(1);

    let digit = |i: usize| bytes.get(i).map(|b| u32::from(b - b'0')).unwrap_or(0);

    let mut lead = digit(0) * 100 + digit(1) * 10 + digit(2);
    if digit(3) >= 5 {
        lead += 1;
    }
    if lead >= 1000 {
        lead /= 10;
        exponent += 1;
    }

    format!("{}.{:02}e+{}", lead / 100, lead % 100, exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_duration_buckets() {
        assert_eq!(format_duration(0.0), "0.00 seconds");
        assert_eq!(format_duration(59.99), "59.99 seconds");
        assert_eq!(format_duration(60.0), "1 minutes");
        assert_eq!(format_duration(3599.0), "59 minutes");
        assert_eq!(format_duration(3600.0), "1 hours");
        assert_eq!(format_duration(86399.0), "23 hours");
        assert_eq!(format_duration(86400.0), "1 days");
        assert_eq!(format_duration(31_535_999.0), "364 days");
        assert_eq!(format_duration(31_536_000.0), "1.00 years");
        assert!(format_duration(315_359_999_999.0).ends_with("years"));
        assert_eq!(format_duration(315_360_000_000.0), CENTURIES_MARKER);
        assert_eq!(format_duration(315_360_000_001.0), CENTURIES_MARKER);
    }

    #[test]
    fn test_duration_out_of_domain() {
        assert_eq!(format_duration(-1.0), CENTURIES_MARKER);
        assert_eq!(format_duration(f64::NAN), CENTURIES_MARKER);
        assert_eq!(format_duration(f64::INFINITY), CENTURIES_MARKER);
        assert_eq!(format_duration(f64::NEG_INFINITY), CENTURIES_MARKER);
    }

    #[test]
    fn test_format_combinations_grouped() {
        assert_eq!(format_combinations(&BigUint::from(10u32)), "10");
        assert_eq!(format_combinations(&BigUint::from(1_679_616u32)), "1,679,616");
        assert_eq!(
            format_combinations(&BigUint::from(EXACT_INTEGER_LIMIT)),
            "9,007,199,254,740,992"
        );
    }

    #[test]
    fn test_format_combinations_scientific() {
        assert_eq!(
            format_combinations(&BigUint::from(EXACT_INTEGER_LIMIT + 1)),
            "9.01e+15"
        );
        // 94^9
        assert_eq!(
            format_combinations(&BigUint::from(572_994_802_228_616_704u64)),
            "5.73e+17"
        );
        // rounding carries into the exponent
        assert_eq!(format_scientific("99960000000000000"), "1.00e+17");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0.0), "0.00s");
        assert_eq!(format_elapsed(1.234), "1.23s");
    }
}
