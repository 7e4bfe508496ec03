//! Lenient numeric parsing for user-entered form values
//!
//! Thousands separators are stripped and anything that is not a number
//! becomes zero, so the engine only ever sees valid numbers.

/// Parse a monetary or plain numeric field.
///
/// Commas are removed and the longest leading numeric prefix is used
/// (`"12abc"` is 12). Blank, unparseable or non-finite input is 0.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let trimmed = cleaned.trim_start();
    let end = numeric_prefix_len(trimmed);

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a whole-number percentage ("2.5" -> 0.025)
pub fn parse_percent(raw: &str) -> f64 {
    parse_amount(raw) / 100.0
}

/// Parse an age; fractions are truncated and negatives become 0
pub fn parse_age(raw: &str) -> u32 {
    let value = parse_amount(raw);
    if value <= 0.0 {
        0
    } else {
        value.trunc() as u32
    }
}

/// Parse a projection horizon. A partial year counts as a full row.
pub fn parse_years(raw: &str) -> i32 {
    let value = parse_amount(raw);
    if value <= 0.0 {
        value.trunc() as i32
    } else {
        value.ceil() as i32
    }
}

/// Length in bytes of the leading `[+-]digits[.digits][e[+-]digits]` run
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_amount_strips_commas() {
        assert_relative_eq!(parse_amount("1,234.50"), 1234.5);
        assert_relative_eq!(parse_amount(" 250,000 "), 250_000.0);
    }

    #[test]
    fn test_parse_amount_blank_and_garbage() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
    }

    #[test]
    fn test_parse_amount_leading_prefix() {
        assert_relative_eq!(parse_amount("12abc"), 12.0);
        assert_relative_eq!(parse_amount("$5"), 0.0);
        assert_relative_eq!(parse_amount(".5"), 0.5);
        assert_relative_eq!(parse_amount("7."), 7.0);
        assert_relative_eq!(parse_amount("1e3x"), 1000.0);
        assert_relative_eq!(parse_amount("2e"), 2.0);
    }

    #[test]
    fn test_parse_amount_keeps_negatives() {
        assert_relative_eq!(parse_amount("-1,500"), -1500.0);
    }

    #[test]
    fn test_parse_amount_rejects_overflow() {
        assert_eq!(parse_amount("1e400"), 0.0);
    }

    #[test]
    fn test_parse_percent() {
        assert_relative_eq!(parse_percent("50"), 0.5);
        assert_relative_eq!(parse_percent("2.5"), 0.025);
        assert_eq!(parse_percent(""), 0.0);
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("67"), 67);
        assert_eq!(parse_age("66.9"), 66);
        assert_eq!(parse_age("-3"), 0);
        assert_eq!(parse_age(""), 0);
    }

    #[test]
    fn test_parse_years() {
        assert_eq!(parse_years("30"), 30);
        assert_eq!(parse_years("10.5"), 11);
        assert_eq!(parse_years("-2"), -2);
        assert_eq!(parse_years("none"), 0);
    }
}
