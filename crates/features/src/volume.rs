//! Volume-derived indicators.

use ohlcv_core::{columns, Result, Series, Table};

use crate::regression::rolling_slope;
use crate::rolling::{divide, pct_change, rolling_mean};

/// Day-over-day relative volume change. Same semantics as daily returns.
pub fn volume_change(table: &Table) -> Result<Series> {
    let volume = table.float(columns::VOLUME)?;
    Ok(pct_change(volume))
}

/// Volume relative to its trailing `window`-row mean.
pub fn relative_volume_change(table: &Table, window: usize) -> Result<Series> {
    let volume = table.float(columns::VOLUME)?;
    let mean = rolling_mean(volume, window)?;
    Ok(divide(volume, &mean))
}

/// Least-squares slope of volume over each trailing window.
///
/// Undefined until `window` rows are available, for windows holding an
/// undefined volume, and everywhere when `window < 2`.
pub fn volume_trend(table: &Table, window: usize) -> Result<Series> {
    let volume = table.float(columns::VOLUME)?;
    rolling_slope(volume, window)
}
