//! Display formatting for assumption values
//!
//! Scenario values are formatted once, when a row is captured, and the
//! formatted string is what travels downstream. Whole-number output rounds
//! half away from zero (`0.125` → `13%`); two-decimal output is the correctly
//! rounded decimal form of the stored double.

use crate::cell::CellValue;

/// Format one Base/Upside/Downside cell for display.
///
/// - empty → `""`
/// - number → [`format_number`]
/// - text → unchanged, so formatting an already formatted value is a no-op
#[must_use]
pub fn format_assumption(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Number(n) => format_number(*n),
        CellValue::Text(s) => s.clone(),
    }
}

/// Format a number by magnitude.
///
/// | value | output |
/// |---|---|
/// | strictly between 0 and 1 | whole percent, `0.125` → `13%` |
/// | `>= 1000` | currency, `1500` → `$1,500` |
/// | `>= 100` | grouped integer, `250.4` → `250` |
/// | integral | grouped integer, `-2000` → `-2,000` |
/// | otherwise | two decimals, `1.5` → `1.50` |
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    if value > 0.0 && value < 1.0 {
        return format!("{}%", format_integer(value * 100.0));
    }
    if value >= 1000.0 {
        return format_currency(value);
    }
    if value >= 100.0 || value.fract() == 0.0 {
        return format_integer(value);
    }

    format!("{value:.2}")
}

/// Currency with thousands separators and no decimals: `$1,500,000`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    format!("${}", format_integer(value))
}

/// Round to a whole number and group thousands: `1234567.8` → `1,234,568`.
#[must_use]
pub fn format_integer(value: f64) -> String {
    let rounded = format!("{:.0}", value.round());
    match rounded.strip_prefix('-') {
        Some(digits) if digits != "0" => format!("-{}", group_thousands(digits, ',')),
        Some(_) => "0".to_string(),
        None => group_thousands(&rounded, ','),
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        let pos_from_end = len - i;
        out.push(ch);
        if pos_from_end > 1 && pos_from_end % 3 == 1 {
            out.push(sep);
        }
    }
    out
}
