//! Timestamp cells as found in exported price files.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format used when writing timestamps.
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a file cell into a date/time.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` with optional fractional seconds (space or
/// `T` separator), RFC 3339 with an offset (converted to UTC), and a bare
/// `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(cell, fmt).ok())
    {
        return Some(dt);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(cell) {
        return Some(dt.naive_utc());
    }

    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
}

/// Format a date/time for output.
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(OUTPUT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        let expected = at(2023, 10, 26, 14, 30, 0);
        assert_eq!(parse_timestamp("2023-10-26 14:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-10-26T14:30:00"), Some(expected));
        assert_eq!(parse_timestamp(" 2023-10-26 14:30:00 "), Some(expected));
        assert_eq!(parse_timestamp("2023-10-26T16:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-10-26T14:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2023-10-26"), Some(at(2023, 10, 26, 0, 0, 0)));
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let dt = parse_timestamp("2023-10-26 14:30:00.250").unwrap();
        assert_eq!(format_timestamp(&dt), "2023-10-26 14:30:00");
        assert_eq!(dt.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("10/26/2023"), None);
        assert_eq!(parse_timestamp("2023-02-30"), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(&at(2024, 1, 1, 9, 5, 7)), "2024-01-01 09:05:07");
    }
}
