//! Volatility indicators.
//!
//! Rolling standard deviation of returns, Average True Range (simple moving
//! average of true range) and the ratio of a short ATR to a long one.

use ohlcv_core::{columns, Result, Series, Table};

use crate::rolling::{divide, rolling_mean, rolling_std, validate_window};

/// Rolling sample standard deviation of a return series.
///
/// The first `window - 1` rows are undefined. Since returns are undefined at
/// row 0, the first defined value of a daily-return input is at row `window`.
pub fn rolling_volatility(returns: &[Option<f64>], window: usize) -> Result<Series> {
    rolling_std(returns, window)
}

/// True range per row.
///
/// The largest of `high - low`, `|high - prev_close|` and `|low - prev_close|`.
/// Row 0 has no previous close, so only `high - low` participates there.
pub fn true_range(table: &Table) -> Result<Series> {
    let high = table.float(columns::HIGH)?;
    let low = table.float(columns::LOW)?;
    let close = table.float(columns::CLOSE)?;

    let tr = (0..high.len())
        .map(|i| {
            let prev_close = if i > 0 { close[i - 1] } else { None };
            [
                span(high[i], low[i], |h, l| h - l),
                span(high[i], prev_close, |h, c| (h - c).abs()),
                span(low[i], prev_close, |l, c| (l - c).abs()),
            ]
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
        })
        .collect();
    Ok(tr)
}

#[inline]
fn span(a: Option<f64>, b: Option<f64>, f: impl Fn(f64, f64) -> f64) -> Option<f64> {
    Some(f(a?, b?))
}

/// Average True Range: trailing simple moving average of true range.
///
/// Requires `high`, `low` and `close`. The first `window - 1` rows are
/// undefined; a window longer than the table leaves every row undefined.
pub fn atr(table: &Table, window: usize) -> Result<Series> {
    validate_window(window)?;
    let tr = true_range(table)?;
    rolling_mean(&tr, window)
}

/// `ATR(recent_window) / ATR(long_window)`, elementwise.
///
/// Undefined wherever either ATR is; infinite where the long ATR is zero.
pub fn volatility_ratio(table: &Table, recent_window: usize, long_window: usize) -> Result<Series> {
    let recent = atr(table, recent_window)?;
    let long = atr(table, long_window)?;
    Ok(divide(&recent, &long))
}
