//! Per-row decomposition of a table's timestamp column.

use ohlcv_core::{Column, Error, Result, Table};
use tracing::debug;

use crate::decompose::{decompose, CalendarRecord};
use crate::input::TimestampInput;

/// Names of the appended calendar columns, in output order.
pub const CALENDAR_COLUMNS: [&str; 7] = [
    "year",
    "quarter",
    "month_number",
    "month_name",
    "week_number",
    "day_of_week_number",
    "day_of_week_name",
];

/// Decompose every input, failing on the first invalid one.
pub fn decompose_all<I, T>(inputs: I) -> Result<Vec<CalendarRecord>>
where
    I: IntoIterator<Item = T>,
    T: Into<TimestampInput>,
{
    inputs.into_iter().map(decompose).collect()
}

/// Copy of `table` with the seven calendar columns appended.
///
/// The timestamp column may hold date/times or `YYYY-MM-DD HH:MM:SS`
/// strings. Original columns and row order are preserved.
pub fn append_calendar_columns(table: &Table, timestamp_column: &str) -> Result<Table> {
    let records = match table.column(timestamp_column) {
        Some(Column::Timestamp(values)) => decompose_all(values.iter().copied())?,
        Some(Column::Text(values)) => decompose_all(values.iter().map(String::as_str))?,
        Some(other) => {
            return Err(Error::invalid_timestamp_type(format!(
                "{} column '{}'",
                other.kind(),
                timestamp_column
            )))
        }
        None => return Err(Error::missing_column(timestamp_column)),
    };

    let ints = |f: fn(&CalendarRecord) -> i64| -> Column {
        Column::Integer(records.iter().map(f).collect())
    };
    let texts = |f: fn(&CalendarRecord) -> String| -> Column {
        Column::Text(records.iter().map(f).collect())
    };

    let mut out = table.clone();
    out.append(CALENDAR_COLUMNS[0], ints(|r| i64::from(r.year)))?;
    out.append(CALENDAR_COLUMNS[1], ints(|r| i64::from(r.quarter)))?;
    out.append(CALENDAR_COLUMNS[2], ints(|r| i64::from(r.month_number)))?;
    out.append(CALENDAR_COLUMNS[3], texts(|r| r.month_name.clone()))?;
    out.append(CALENDAR_COLUMNS[4], ints(|r| i64::from(r.week_number)))?;
    out.append(CALENDAR_COLUMNS[5], ints(|r| i64::from(r.day_of_week_number)))?;
    out.append(CALENDAR_COLUMNS[6], texts(|r| r.day_of_week_name.clone()))?;

    debug!(rows = records.len(), "appended calendar columns");
    Ok(out)
}
