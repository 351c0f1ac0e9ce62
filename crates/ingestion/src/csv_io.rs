//! CSV reading and writing of tables.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Writer};
use ohlcv_core::{defined, Column, Error, IoConfig, Result, Table};
use tracing::{debug, info};

use crate::timestamp::{format_timestamp, parse_timestamp};

/// Load a table from a CSV file.
pub fn read_table(path: impl AsRef<Path>, config: &IoConfig) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_table_from_reader(file, config)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.width(),
        "loaded table"
    );
    Ok(table)
}

/// Load a table from any CSV source with a header row.
///
/// Header names are trimmed and lower-cased. The configured timestamp column
/// becomes a timestamp column; every other column is real-valued when all
/// its non-empty cells parse as numbers, and text otherwise.
pub fn read_table_from_reader<R: Read>(reader: R, config: &IoConfig) -> Result<Table> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(Error::csv)?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record: StringRecord = result.map_err(Error::csv)?;
        for (column, cell) in cells.iter_mut().zip(record.iter()) {
            column.push(cell.trim().to_string());
        }
    }

    let timestamp_column = config.timestamp_key();
    let mut table = Table::new();
    for (name, values) in headers.into_iter().zip(cells) {
        let column = if name == timestamp_column {
            timestamp_column_from(&name, &values)?
        } else {
            infer_column(values)
        };
        debug!(column = %name, kind = column.kind(), "parsed column");
        table.append(name, column)?;
    }

    Ok(table)
}

fn timestamp_column_from(name: &str, values: &[String]) -> Result<Column> {
    values
        .iter()
        .enumerate()
        .map(|(row, cell)| {
            parse_timestamp(cell).ok_or_else(|| {
                Error::data(format!(
                    "row {}: cannot parse '{}' in column '{}' as a timestamp",
                    row + 1,
                    cell,
                    name
                ))
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Column::Timestamp)
}

/// Real-valued if every non-empty cell is a number, text otherwise.
fn infer_column(values: Vec<String>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = values
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                Some(None)
            } else {
                cell.parse::<f64>().ok().map(defined)
            }
        })
        .collect();

    match parsed {
        Some(series) => Column::Float(series),
        None => Column::Text(values),
    }
}

/// Save a table to a CSV file, replacing any existing file.
pub fn write_table(path: impl AsRef<Path>, table: &Table) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_table_to_writer(file, table)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.width(),
        "saved table"
    );
    Ok(())
}

/// Write a table as CSV with a header row.
///
/// Undefined values become empty cells.
pub fn write_table_to_writer<W: Write>(writer: W, table: &Table) -> Result<()> {
    let mut writer = Writer::from_writer(writer);

    writer
        .write_record(table.column_names())
        .map_err(Error::csv)?;

    for row in 0..table.len() {
        let record: Vec<String> = table.iter().map(|(_, column)| cell(column, row)).collect();
        writer.write_record(&record).map_err(Error::csv)?;
    }

    writer.flush()?;
    Ok(())
}

fn cell(column: &Column, row: usize) -> String {
    match column {
        Column::Timestamp(v) => format_timestamp(&v[row]),
        Column::Float(v) => v[row].map(|x| x.to_string()).unwrap_or_default(),
        Column::Integer(v) => v[row].to_string(),
        Column::Text(v) => v[row].clone(),
    }
}
