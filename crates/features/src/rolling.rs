//! Trailing-window and shift helpers shared by the indicators.
//!
//! A window containing an undefined value produces an undefined output, and
//! the first `window - 1` rows are always undefined.

use ohlcv_core::{defined, Error, Result, Series};
use statrs::statistics::Statistics;

/// Reject windows that cannot hold a single row.
pub fn validate_window(window: usize) -> Result<()> {
    if window == 0 {
        return Err(Error::invalid_window("window must be a positive integer, got 0"));
    }
    Ok(())
}

/// Apply `f` to every complete trailing window of `window` rows.
pub fn rolling_apply<F>(values: &[Option<f64>], window: usize, f: F) -> Result<Series>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    validate_window(window)?;

    let mut out = Vec::with_capacity(values.len());
    for end in 0..values.len() {
        if end + 1 < window {
            out.push(None);
            continue;
        }
        let start = end + 1 - window;
        let row = values[start..=end]
            .iter()
            .copied()
            .collect::<Option<Vec<f64>>>()
            .and_then(|w| f(&w));
        out.push(row);
    }
    Ok(out)
}

/// Trailing simple moving average.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Result<Series> {
    rolling_apply(values, window, |w| defined(w.iter().mean()))
}

/// Trailing sample standard deviation (n - 1 denominator).
///
/// A one-row window has no sample deviation and stays undefined.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Result<Series> {
    rolling_apply(values, window, |w| defined(w.iter().std_dev()))
}

/// Single-step relative change: `(x[i] - x[i-1]) / x[i-1]`.
///
/// Row 0 is undefined. A zero predecessor yields a signed infinity, or
/// undefined when the current value is zero too.
pub fn pct_change(values: &[Option<f64>]) -> Series {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(values.windows(2).map(|pair| match (pair[0], pair[1]) {
        (Some(prev), Some(curr)) => defined((curr - prev) / prev),
        _ => None,
    }));
    out
}

/// Elementwise `numerator / denominator`.
pub fn divide(numerator: &[Option<f64>], denominator: &[Option<f64>]) -> Series {
    numerator
        .iter()
        .zip(denominator)
        .map(|(n, d)| match (n, d) {
            (Some(n), Some(d)) => defined(n / d),
            _ => None,
        })
        .collect()
}

/// Number of defined positions in a series.
pub fn count_defined(values: &[Option<f64>]) -> usize {
    values.iter().filter(|v| v.is_some()).count()
}
