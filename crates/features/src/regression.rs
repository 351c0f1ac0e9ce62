//! Ordinary least-squares trend fitting.

use ohlcv_core::{defined, Result, Series};
use statrs::statistics::Statistics;

use crate::rolling::rolling_apply;

/// Slope `a` of the least-squares line `y ≈ a·t + b`, with `t = 0..n-1`.
///
/// Returns `None` for fewer than two observations.
pub fn ols_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let t_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().mean();

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (t, &y) in values.iter().enumerate() {
        let dt = t as f64 - t_mean;
        sxy += dt * (y - y_mean);
        sxx += dt * dt;
    }

    defined(sxy / sxx)
}

/// OLS slope over every trailing window of `window` rows.
pub fn rolling_slope(values: &[Option<f64>], window: usize) -> Result<Series> {
    rolling_apply(values, window, ols_slope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_slope() {
        let values: Vec<f64> = (0..10).map(|t| 3.0 * t as f64 + 7.0).collect();
        assert_relative_eq!(ols_slope(&values).unwrap(), 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_flat_slope() {
        assert_relative_eq!(ols_slope(&[5.0, 5.0, 5.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_known_fit() {
        // t = 0, 1, 2; y = 1, 3, 2 -> slope 0.5
        assert_relative_eq!(ols_slope(&[1.0, 3.0, 2.0]).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_too_few_points() {
        assert!(ols_slope(&[]).is_none());
        assert!(ols_slope(&[1.0]).is_none());
    }

    #[test]
    fn test_rolling_slope() {
        let values = vec![Some(1.0), Some(2.0), Some(4.0), None, Some(5.0), Some(6.0)];
        let out = rolling_slope(&values, 2).unwrap();
        assert_eq!(out[0], None);
        assert_relative_eq!(out[1].unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(out[2].unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(out[3], None);
        assert_eq!(out[4], None);
        assert_relative_eq!(out[5].unwrap(), 1.0, epsilon = 1e-12);
    }
}
