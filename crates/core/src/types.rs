//! Core data types for the OHLCV feature toolkit.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A derived series aligned row-for-row with its source table.
///
/// `None` marks an undefined position. Infinities are valid values.
pub type Series = Vec<Option<f64>>;

/// Canonical column names of a price/volume table.
pub mod columns {
    pub const TIMESTAMP: &str = "timestamp";
    pub const OPEN: &str = "open";
    pub const HIGH: &str = "high";
    pub const LOW: &str = "low";
    pub const CLOSE: &str = "close";
    pub const VOLUME: &str = "volume";
}

/// Keep infinities, map NaN to undefined.
#[inline]
pub fn defined(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Daily OHLCV observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvBar {
    /// Observation instant.
    pub timestamp: NaiveDateTime,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

/// A single typed column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Date/time values.
    Timestamp(Vec<NaiveDateTime>),
    /// Real values with explicit undefined cells.
    Float(Series),
    /// Integer values.
    Integer(Vec<i64>),
    /// Free text.
    Text(Vec<String>),
}

impl Column {
    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Timestamp(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Integer(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short type name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Column::Timestamp(_) => "timestamp",
            Column::Float(_) => "float",
            Column::Integer(_) => "integer",
            Column::Text(_) => "text",
        }
    }
}

impl From<Series> for Column {
    fn from(values: Series) -> Self {
        Column::Float(values)
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Float(values.into_iter().map(Some).collect())
    }
}

/// Ordered table of named, equal-length columns.
///
/// Rows are in ascending chronological order. Indicators address rows by
/// position, not by timestamp value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Column>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table with `timestamp`, `open`, `high`, `low`, `close` and
    /// `volume` columns from row-oriented bars.
    pub fn from_bars(bars: &[OhlcvBar]) -> Self {
        let field = |f: fn(&OhlcvBar) -> f64| -> Column {
            Column::Float(bars.iter().map(|b| Some(f(b))).collect())
        };

        let mut map = IndexMap::with_capacity(6);
        map.insert(
            columns::TIMESTAMP.to_string(),
            Column::Timestamp(bars.iter().map(|b| b.timestamp).collect()),
        );
        map.insert(columns::OPEN.to_string(), field(|b| b.open));
        map.insert(columns::HIGH.to_string(), field(|b| b.high));
        map.insert(columns::LOW.to_string(), field(|b| b.low));
        map.insert(columns::CLOSE.to_string(), field(|b| b.close));
        map.insert(columns::VOLUME.to_string(), field(|b| b.volume));

        Self { columns: map }
    }

    /// Number of rows (0 for a table without columns).
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, Column::len)
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert or replace a column.
    ///
    /// The first column fixes the row count; later columns must match it.
    pub fn insert(&mut self, name: impl Into<String>, column: impl Into<Column>) -> Result<()> {
        let name = name.into();
        let column = column.into();

        let replaces_only_column = self.columns.len() == 1 && self.columns.contains_key(&name);
        if !self.columns.is_empty() && !replaces_only_column && column.len() != self.len() {
            return Err(Error::data(format!(
                "column '{}' has {} rows, table has {}",
                name,
                column.len(),
                self.len()
            )));
        }

        self.columns.insert(name, column);
        Ok(())
    }

    /// Add a new column after the existing ones.
    ///
    /// Unlike [`Table::insert`], an existing column of the same name is an
    /// error rather than being replaced.
    pub fn append(&mut self, name: impl Into<String>, column: impl Into<Column>) -> Result<()> {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(Error::data(format!("column '{}' already exists", name)));
        }
        self.insert(name, column)
    }

    /// Builder form of [`Table::insert`].
    pub fn with_column(mut self, name: impl Into<String>, column: impl Into<Column>) -> Result<Self> {
        self.insert(name, column)?;
        Ok(self)
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Look up a required real-valued column.
    pub fn float(&self, name: &str) -> Result<&[Option<f64>]> {
        match self.columns.get(name) {
            Some(Column::Float(values)) => Ok(values),
            Some(other) => Err(Error::data(format!(
                "column '{}' is {}, expected float",
                name,
                other.kind()
            ))),
            None => Err(Error::missing_column(name)),
        }
    }

    /// Look up a required date/time column.
    pub fn timestamps(&self, name: &str) -> Result<&[NaiveDateTime]> {
        match self.columns.get(name) {
            Some(Column::Timestamp(values)) => Ok(values),
            Some(other) => Err(Error::data(format!(
                "column '{}' is {}, expected timestamp",
                name,
                other.kind()
            ))),
            None => Err(Error::missing_column(name)),
        }
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Columns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}
