//! Calendar decomposition of a single timestamp.
//!
//! Week numbers follow ISO-8601: weeks start on Monday and week 1 contains
//! the year's first Thursday, so dates close to New Year can carry a week
//! number of the adjacent year (2021-01-01 is week 53, 2024-12-30 is week 1).

use chrono::{Datelike, NaiveDateTime};
use ohlcv_core::{Error, Result, TIMESTAMP_PATTERN};
use serde::{Deserialize, Serialize};

use crate::input::TimestampInput;

/// chrono equivalent of [`TIMESTAMP_PATTERN`].
const STRICT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Calendar attributes of one timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRecord {
    pub year: i32,
    /// 1–4.
    pub quarter: u32,
    /// 1–12.
    pub month_number: u32,
    /// Full English month name ("January").
    pub month_name: String,
    /// ISO-8601 week, 1–53.
    pub week_number: u32,
    /// ISO weekday, Monday = 1 … Sunday = 7.
    pub day_of_week_number: u32,
    /// Full English weekday name ("Thursday").
    pub day_of_week_name: String,
}

impl From<NaiveDateTime> for CalendarRecord {
    fn from(dt: NaiveDateTime) -> Self {
        let date = dt.date();
        Self {
            year: date.year(),
            quarter: (date.month() - 1) / 3 + 1,
            month_number: date.month(),
            month_name: date.format("%B").to_string(),
            week_number: date.iso_week().week(),
            day_of_week_number: date.weekday().number_from_monday(),
            day_of_week_name: date.format("%A").to_string(),
        }
    }
}

/// Decompose a date/time or a `YYYY-MM-DD HH:MM:SS` string.
///
/// # Errors
/// - [`Error::InvalidTimestampFormat`] for a string that does not match the
///   pattern exactly or names an impossible date.
/// - [`Error::InvalidTimestampType`] for any other kind of input.
pub fn decompose(input: impl Into<TimestampInput>) -> Result<CalendarRecord> {
    let dt = match input.into() {
        TimestampInput::DateTime(dt) => dt,
        TimestampInput::Text(s) => parse_strict(&s)?,
        other => return Err(Error::invalid_timestamp_type(other.kind())),
    };
    Ok(CalendarRecord::from(dt))
}

/// Parse a string in exactly `YYYY-MM-DD HH:MM:SS` form.
pub fn parse_strict(s: &str) -> Result<NaiveDateTime> {
    if !matches_pattern(s) {
        return Err(Error::invalid_timestamp_format(s));
    }
    NaiveDateTime::parse_from_str(s, STRICT_FORMAT).map_err(|_| Error::invalid_timestamp_format(s))
}

/// Letters of the pattern stand for one ASCII digit; everything else must
/// match literally. chrono alone would accept unpadded fields.
fn matches_pattern(s: &str) -> bool {
    s.len() == TIMESTAMP_PATTERN.len()
        && s.bytes().zip(TIMESTAMP_PATTERN.bytes()).all(|(c, p)| {
            if p.is_ascii_alphabetic() {
                c.is_ascii_digit()
            } else {
                c == p
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn test_string_timestamp_basic() {
        let record = decompose("2023-10-26 14:30:00").unwrap();
        assert_eq!(
            record,
            CalendarRecord {
                year: 2023,
                quarter: 4,
                month_number: 10,
                month_name: "October".to_string(),
                week_number: 43,
                day_of_week_number: 4,
                day_of_week_name: "Thursday".to_string(),
            }
        );
    }

    #[test]
    fn test_datetime_matches_string() {
        let from_dt = decompose(at(2023, 10, 26, 14, 30, 0)).unwrap();
        assert_eq!(from_dt, decompose("2023-10-26 14:30:00").unwrap());
    }

    #[test]
    fn test_iso_week_boundaries() {
        let r = decompose("2024-01-01 12:00:00").unwrap();
        assert_eq!((r.week_number, r.day_of_week_number), (1, 1));

        let r = decompose("2023-12-31 12:00:00").unwrap();
        assert_eq!((r.week_number, r.day_of_week_number), (52, 7));
        assert_eq!(r.day_of_week_name, "Sunday");

        let r = decompose("2020-12-28 12:00:00").unwrap();
        assert_eq!((r.week_number, r.day_of_week_number), (53, 1));

        // Belongs to the last ISO week of 2020
        let r = decompose("2021-01-01 00:00:00").unwrap();
        assert_eq!((r.year, r.week_number), (2021, 53));

        // Belongs to ISO week 1 of 2025
        let r = decompose("2024-12-30 08:00:00").unwrap();
        assert_eq!((r.year, r.week_number), (2024, 1));
    }

    #[test]
    fn test_quarter_boundaries() {
        let cases = [
            ("2023-01-01 00:00:00", 1),
            ("2023-03-31 23:59:59", 1),
            ("2023-04-01 00:00:00", 2),
            ("2023-06-30 23:59:59", 2),
            ("2023-07-01 00:00:00", 3),
            ("2023-10-01 00:00:00", 4),
            ("2023-12-31 23:59:59", 4),
        ];
        for (s, quarter) in cases {
            assert_eq!(decompose(s).unwrap().quarter, quarter, "{s}");
        }
    }

    #[test]
    fn test_days_of_week() {
        let days = [
            "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
        ];
        for (i, name) in days.iter().enumerate() {
            let r = decompose(at(2023, 10, 23 + i as u32, 12, 0, 0)).unwrap();
            assert_eq!(r.day_of_week_name, *name);
            assert_eq!(r.day_of_week_number, i as u32 + 1);
        }
    }

    #[test]
    fn test_months() {
        let months = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        for (i, name) in months.iter().enumerate() {
            let r = decompose(format!("2023-{:02}-15 12:00:00", i + 1)).unwrap();
            assert_eq!(r.month_number, i as u32 + 1);
            assert_eq!(r.month_name, *name);
        }
    }

    #[test]
    fn test_leap_day() {
        let r = decompose("2024-02-29 12:00:00").unwrap();
        assert_eq!((r.year, r.month_number), (2024, 2));
        assert_eq!(r.day_of_week_name, "Thursday");
    }

    #[test]
    fn test_year_boundaries() {
        for (s, year) in [
            ("1999-12-31 23:59:59", 1999),
            ("2000-01-01 00:00:00", 2000),
            ("2099-12-31 23:59:59", 2099),
            ("2100-01-01 00:00:00", 2100),
        ] {
            assert_eq!(decompose(s).unwrap().year, year);
        }
    }

    #[test]
    fn test_invalid_string_format() {
        let invalid = [
            "2023-10-26",
            "10/26/2023 14:30:00",
            "2023-10-26T14:30:00",
            "26-10-2023 14:30:00",
            "2023/10/26 14:30:00",
            "invalid date string",
            "2023-1-5 1:02:03",
            "2023-10-26 14:30:00.5",
            "2023-10-26 14:30:00+00:00",
            "2023-02-30 12:00:00",
            "2023-10-26 24:00:00",
        ];
        for s in invalid {
            let err = decompose(s).unwrap_err();
            assert!(matches!(err, Error::InvalidTimestampFormat(_)), "{s}");
            assert!(err.to_string().contains("Timestamp string must match"));
        }
    }

    #[test]
    fn test_invalid_input_type() {
        let invalid = [
            TimestampInput::Integer(123456789),
            TimestampInput::Float(12.34),
            TimestampInput::List(vec!["2023-10-26 14:30:00".into()]),
            TimestampInput::Map(BTreeMap::from([(
                "date".to_string(),
                TimestampInput::from("2023-10-26 14:30:00"),
            )])),
            TimestampInput::Null,
        ];
        for input in invalid {
            let err = decompose(input).unwrap_err();
            assert!(matches!(err, Error::InvalidTimestampType(_)));
            assert!(err
                .to_string()
                .contains("must be a datetime object or a timestamp string"));
        }
    }

    #[test]
    fn test_pattern_shape() {
        assert!(matches_pattern("0000-00-00 00:00:00"));
        assert!(!matches_pattern("2023-10-26 14:30"));
        assert!(!matches_pattern("2023-10-26  4:30:00"));
    }
}
