//! Cell type coercion
//!
//! Classifies raw scalars into typed cells. Values that are already typed
//! in the source JSON keep their type; strings go through an ordered set of
//! parse attempts (boolean, integer, decimal, date/time) and fall back to
//! verbatim text. The order is an observable contract: boolean-like strings
//! must never coerce to numbers, and numeric parses require the exact
//! canonical format, so codes like "0123" stay text.

use crate::flatten::types::CellValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// Pre-compiled patterns for the textual fast paths
static INTEGER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(0|[1-9]\d*)$").unwrap()
});

static DECIMAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(0|[1-9]\d*)(\.\d+([eE][+-]?\d+)?|[eE][+-]?\d+)$").unwrap()
});

static DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})?$").unwrap()
});

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap()
});

/// Coerce a raw JSON scalar into a typed cell.
///
/// Objects and arrays never reach this point during flattening; if passed
/// anyway they are stringified to their JSON text.
pub fn coerce(raw: Value) -> CellValue {
    match raw {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Boolean(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer64(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Decimal(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        Value::String(s) => coerce_text(s),
        compound => CellValue::Text(compound.to_string()),
    }
}

/// Infer a typed cell from text. Checks trim surrounding whitespace, but a
/// value that stays text is kept verbatim.
pub fn coerce_text(s: String) -> CellValue {
    let trimmed = s.trim();

    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Boolean(false);
    }

    if INTEGER_REGEX.is_match(trimmed) {
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer64(i);
        }
        // Canonical integer beyond the i64 range
        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Decimal(f);
        }
    }

    if DECIMAL_REGEX.is_match(trimmed) {
        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Decimal(f);
        }
    }

    if let Some(dt) = parse_date_time(trimmed) {
        return CellValue::DateTime(dt);
    }

    CellValue::Text(s)
}

/// Parse an ISO-style date/time. The regex is only a fast shape check;
/// chrono validates the actual calendar values.
fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let bytes = s.as_bytes();

    if s.len() >= 19 && (bytes[10] == b'T' || bytes[10] == b' ') && DATETIME_REGEX.is_match(s) {
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Some(dt);
            }
        }
        // Remaining shapes carry a Z or numeric offset
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_utc());
        }
    }

    if s.len() == 10 && DATE_REGEX.is_match(s) {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coerce_str(s: &str) -> CellValue {
        coerce_text(s.to_string())
    }

    #[test]
    fn test_native_types_pass_through() {
        assert_eq!(coerce(json!(null)), CellValue::Empty);
        assert_eq!(coerce(json!(true)), CellValue::Boolean(true));
        assert_eq!(coerce(json!(42)), CellValue::Integer64(42));
        assert_eq!(coerce(json!(12.5)), CellValue::Decimal(12.5));
    }

    #[test]
    fn test_u64_beyond_i64_becomes_decimal() {
        let n = json!(u64::MAX);
        assert!(matches!(coerce(n), CellValue::Decimal(_)));
    }

    #[test]
    fn test_text_boolean() {
        assert_eq!(coerce_str("true"), CellValue::Boolean(true));
        assert_eq!(coerce_str("False"), CellValue::Boolean(false));
        assert_eq!(coerce_str(" TRUE "), CellValue::Boolean(true));
    }

    #[test]
    fn test_text_integer() {
        assert_eq!(coerce_str("123"), CellValue::Integer64(123));
        assert_eq!(coerce_str("-7"), CellValue::Integer64(-7));
        assert_eq!(coerce_str("0"), CellValue::Integer64(0));
    }

    #[test]
    fn test_text_integer_wide() {
        // Past the 32-bit range, still a 64-bit integer
        assert_eq!(
            coerce_str("2147483648123"),
            CellValue::Integer64(2_147_483_648_123)
        );
    }

    #[test]
    fn test_text_integer_beyond_i64_becomes_decimal() {
        assert!(matches!(
            coerce_str("99999999999999999999"),
            CellValue::Decimal(_)
        ));
    }

    #[test]
    fn test_leading_zero_stays_text() {
        // Phone-number-looking codes must not lose their leading zero
        assert_eq!(coerce_str("0123"), CellValue::Text("0123".to_string()));
        assert_eq!(coerce_str("01.5"), CellValue::Text("01.5".to_string()));
    }

    #[test]
    fn test_text_decimal() {
        assert_eq!(coerce_str("12.5"), CellValue::Decimal(12.5));
        assert_eq!(coerce_str("-0.25"), CellValue::Decimal(-0.25));
        assert_eq!(coerce_str("1e3"), CellValue::Decimal(1000.0));
    }

    #[test]
    fn test_text_datetime() {
        let cell = coerce_str("2024-01-01T10:00:00");
        match cell {
            CellValue::DateTime(dt) => {
                assert_eq!(dt.to_string(), "2024-01-01 10:00:00")
            }
            other => panic!("expected DateTime, got {:?}", other),
        }
    }

    #[test]
    fn test_text_datetime_with_offset() {
        assert!(matches!(
            coerce_str("2024-01-01T10:00:00Z"),
            CellValue::DateTime(_)
        ));
        assert!(matches!(
            coerce_str("2024-01-01T10:00:00.250+02:00"),
            CellValue::DateTime(_)
        ));
    }

    #[test]
    fn test_text_date_at_midnight() {
        match coerce_str("2024-03-15") {
            CellValue::DateTime(dt) => {
                assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00")
            }
            other => panic!("expected DateTime, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_calendar_date_stays_text() {
        // Shape matches, values don't
        assert_eq!(
            coerce_str("2024-13-01T10:00:00"),
            CellValue::Text("2024-13-01T10:00:00".to_string())
        );
    }

    #[test]
    fn test_plain_text_verbatim() {
        assert_eq!(coerce_str("abc"), CellValue::Text("abc".to_string()));
        assert_eq!(coerce_str("  abc  "), CellValue::Text("  abc  ".to_string()));
    }
}
