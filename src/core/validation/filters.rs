//! Field filters
//!
//! These filters turn raw posted strings into the values the schema checks.

/// Filter: trim whitespace, mapping blank input to `None`
pub fn trimmed(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Filter: coerce a posted value to a number the way `Number(value)` does in
/// a browser
///
/// - missing or blank → `0.0`
/// - surrounding whitespace is ignored
/// - decimal and exponent notation are accepted
/// - unsigned `0x`/`0o`/`0b` integer literals are accepted
/// - anything else → `NaN`
pub fn coerce_number(raw: Option<&str>) -> f64 {
    let Some(s) = raw.map(str::trim) else {
        return 0.0;
    };
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(value) = radix_literal(s) {
        return value;
    }
    // Rust also accepts "inf" and "NaN" spellings, which a browser does not
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// `0x1F`, `0o17`, `0b101` (any case); `NaN` when the digits are invalid
fn radix_literal(s: &str) -> Option<f64> {
    let prefix = s.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}
