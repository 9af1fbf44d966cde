//! ISO-8601 timestamp helpers for stored documents.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 (with `Z` or an offset), naive date-times with optional
/// fractional seconds, and bare dates. Naive values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a timestamp for storage.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let parsed = parse_timestamp("2024-03-01T12:30:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());

        let parsed = parse_timestamp("2024-03-01T14:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime() {
        let parsed = parse_timestamp("2024-03-01T12:30:00.123456").unwrap();
        assert_eq!(parsed.date_naive().to_string(), "2024-03-01");

        assert!(parse_timestamp("2024-03-01T12:30:00").is_some());
    }

    #[test]
    fn test_parse_date_only() {
        let parsed = parse_timestamp("2024-03-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-45").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_format_parses_back() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(parse_timestamp(&format_timestamp(at)), Some(at));
    }
}
