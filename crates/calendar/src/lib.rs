//! Calendar decomposition for the OHLCV feature toolkit.
//!
//! Splits timestamps into year, quarter, month, ISO week and ISO weekday
//! attributes, one record per row. Strings must follow
//! `YYYY-MM-DD HH:MM:SS` exactly.

pub mod input;
pub mod decompose;
pub mod batch;

pub use batch::{append_calendar_columns, decompose_all, CALENDAR_COLUMNS};
pub use decompose::{decompose, parse_strict, CalendarRecord};
pub use input::TimestampInput;
