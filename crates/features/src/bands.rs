//! Bollinger Bands and band width.

use ohlcv_core::{columns, defined, Error, Result, Series, Table};
use serde::Serialize;

use crate::rolling::{rolling_mean, rolling_std, validate_window};

/// Moving-average envelope of the close.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerBands {
    /// Trailing simple moving average.
    pub middle_band: Series,
    /// Middle band plus `k` standard deviations.
    pub upper_band: Series,
    /// Middle band minus `k` standard deviations.
    pub lower_band: Series,
}

impl BollingerBands {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.middle_band.len()
    }

    /// Whether the bands have no rows.
    pub fn is_empty(&self) -> bool {
        self.middle_band.is_empty()
    }

    /// `(upper - lower) / middle` per row.
    ///
    /// Undefined wherever an operand is undefined; infinite when the middle
    /// band is zero and the bands are apart.
    pub fn width(&self) -> Series {
        self.upper_band
            .iter()
            .zip(&self.lower_band)
            .zip(&self.middle_band)
            .map(|((upper, lower), middle)| match (upper, lower, middle) {
                (Some(u), Some(l), Some(m)) => defined((u - l) / m),
                _ => None,
            })
            .collect()
    }
}

/// Bollinger Bands over `close`.
///
/// `num_std_dev` must be finite and non-negative; zero collapses all three
/// bands onto the moving average.
pub fn bollinger_bands(table: &Table, window: usize, num_std_dev: f64) -> Result<BollingerBands> {
    validate_window(window)?;
    if !num_std_dev.is_finite() || num_std_dev < 0.0 {
        return Err(Error::invalid_parameter(format!(
            "num_std_dev must be a finite non-negative number, got {num_std_dev}"
        )));
    }

    let close = table.float(columns::CLOSE)?;
    let middle_band = rolling_mean(close, window)?;
    let std_dev = rolling_std(close, window)?;

    let offset: Series = std_dev.iter().map(|s| s.map(|s| num_std_dev * s)).collect();
    let shift = |sign: f64| -> Series {
        middle_band
            .iter()
            .zip(&offset)
            .map(|(m, o)| Some((*m)? + sign * (*o)?))
            .collect()
    };
    let upper_band = shift(1.0);
    let lower_band = shift(-1.0);

    Ok(BollingerBands {
        middle_band,
        upper_band,
        lower_band,
    })
}

/// Relative band width `(upper - lower) / middle`.
pub fn bollinger_band_width(table: &Table, window: usize, num_std_dev: f64) -> Result<Series> {
    Ok(bollinger_bands(table, window, num_std_dev)?.width())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn close_table(close: &[f64]) -> Table {
        Table::new().with_column("close", close.to_vec()).unwrap()
    }

    fn simple_close() -> Table {
        close_table(&[101.0, 102.0, 103.0, 99.0, 100.0, 104.0, 106.0, 105.0, 107.0, 109.0])
    }

    #[test]
    fn test_bands_shape_and_order() {
        let bb = bollinger_bands(&simple_close(), 5, 2.0).unwrap();
        assert_eq!(bb.len(), 10);

        for i in 0..4 {
            assert!(bb.middle_band[i].is_none());
            assert!(bb.upper_band[i].is_none());
            assert!(bb.lower_band[i].is_none());
        }
        for i in 4..10 {
            let (m, u, l) = (
                bb.middle_band[i].unwrap(),
                bb.upper_band[i].unwrap(),
                bb.lower_band[i].unwrap(),
            );
            assert!(u >= m && m >= l);
        }
    }

    #[test]
    fn test_bands_known_values() {
        let bb = bollinger_bands(&close_table(&[1.0, 2.0, 3.0]), 3, 2.0).unwrap();
        // mean 2, sample std 1
        assert_relative_eq!(bb.middle_band[2].unwrap(), 2.0);
        assert_relative_eq!(bb.upper_band[2].unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(bb.lower_band[2].unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_insufficient_data() {
        let bb = bollinger_bands(&close_table(&[100.0, 101.0, 102.0]), 5, 2.0).unwrap();
        assert_eq!(bb.len(), 3);
        assert!(bb.middle_band.iter().all(Option::is_none));
    }

    #[test]
    fn test_zero_std_dev_collapses() {
        let bb = bollinger_bands(&simple_close(), 5, 0.0).unwrap();
        assert_eq!(bb.upper_band, bb.middle_band);
        assert_eq!(bb.lower_band, bb.middle_band);

        let width = bollinger_band_width(&simple_close(), 5, 0.0).unwrap();
        assert!(width.iter().flatten().all(|&w| w == 0.0));
    }

    #[test]
    fn test_negative_std_dev_rejected() {
        let result = bollinger_bands(&simple_close(), 5, -1.0);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_width_positive() {
        let width = bollinger_band_width(&simple_close(), 5, 2.0).unwrap();
        assert_eq!(width.len(), 10);
        assert!(width[..4].iter().all(Option::is_none));
        assert!(width[4..].iter().all(|w| w.unwrap() > 0.0));
    }

    #[test]
    fn test_width_zero_middle() {
        let width = bollinger_band_width(&close_table(&[-1.0, 1.0]), 2, 2.0).unwrap();
        assert_eq!(width[1], Some(f64::INFINITY));
    }
}
