//! Daily returns and return dispersion.

use ohlcv_core::{columns, Result, Series, Table};
use statrs::statistics::Statistics;

use crate::rolling::pct_change;

/// Decimal places kept by [`return_std_dev`].
const STD_DEV_DECIMALS: i32 = 4;

/// Close-to-close relative change.
///
/// Row 0 is undefined. Requires a `close` column.
pub fn daily_returns(table: &Table) -> Result<Series> {
    let close = table.float(columns::CLOSE)?;
    Ok(pct_change(close))
}

/// Sample standard deviation of the defined returns, rounded to 4 decimals.
///
/// Undefined entries are skipped. Fewer than two defined values, or infinite
/// returns, leave the dispersion undefined.
pub fn return_std_dev(returns: &[Option<f64>]) -> Option<f64> {
    let values: Vec<f64> = returns.iter().flatten().copied().collect();
    if values.len() < 2 {
        return None;
    }

    let std_dev = values.iter().std_dev();
    if !std_dev.is_finite() {
        return None;
    }
    Some(round_to(std_dev, STD_DEV_DECIMALS))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
