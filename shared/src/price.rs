//! Rupiah price handling
//!
//! Menu prices arrive as display strings with `.` thousands separators
//! (`"25.000"`) or as JSON numbers. They are parsed once into whole rupiah
//! (`i64`) and formatted only for display.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a display price by keeping only its digits
///
/// `"15.000"` → 15000, `"Rp 1.250.000"` → 1250000. No digits, or a value
/// that does not fit in `i64`, yields 0.
pub fn parse_display_price(text: &str) -> i64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<i64>().unwrap_or(0)
}

/// Dot-separated thousands (`30000` → `"30.000"`)
pub fn format_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Display form with currency prefix (`"Rp 30.000"`)
pub fn format_rupiah(amount: i64) -> String {
    format!("Rp {}", format_thousands(amount))
}

/// Serde helper for backend amounts sent as float, integer or display string
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_display_price(&s),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_price() {
        assert_eq!(parse_display_price("15.000"), 15000);
        assert_eq!(parse_display_price("25.000"), 25000);
        assert_eq!(parse_display_price("Rp 1.250.000"), 1_250_000);
        assert_eq!(parse_display_price("8000"), 8000);
        assert_eq!(parse_display_price(""), 0);
        assert_eq!(parse_display_price("gratis"), 0);
        assert_eq!(parse_display_price("99999999999999999999999"), 0);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1.000");
        assert_eq!(format_thousands(30000), "30.000");
        assert_eq!(format_thousands(1_250_000), "1.250.000");
        assert_eq!(format_thousands(-20000), "-20.000");
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(20000), "Rp 20.000");
    }

    #[test]
    fn test_display_roundtrip() {
        for amount in [0, 7, 15000, 123_456_789] {
            assert_eq!(parse_display_price(&format_thousands(amount)), amount);
        }
    }
}
