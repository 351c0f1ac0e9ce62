//! PyO3 bindings for the OHLCV feature toolkit.
//!
//! Exposes the Rust implementations to pandas-based Python code:
//! - Return, volatility and band indicators
//! - Volume indicators
//! - Calendar decomposition of timestamps
//!
//! Price data is passed as a mapping of column name to values (a `dict` of
//! lists or a pandas `DataFrame`). Series come back as lists where `None`
//! marks an undefined row.

use chrono::NaiveDateTime;
use pyo3::exceptions::{PyKeyError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDateTime, PyDict};

use indicators::{
    atr, bollinger_band_width, bollinger_bands, daily_returns, relative_volume_change,
    return_std_dev, rolling_volatility, volatility_ratio, volume_change, volume_trend,
};
use ohlcv_calendar::{decompose, CalendarRecord, TimestampInput};
use ohlcv_core::{columns, defined, Error, Series, Table};

// ============================================================================
// Conversions
// ============================================================================

fn to_py_err(err: Error) -> PyErr {
    match err {
        Error::MissingColumn(_) => PyKeyError::new_err(err.to_string()),
        Error::InvalidTimestampType(_) => PyTypeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn window(name: &str, value: i64) -> PyResult<usize> {
    usize::try_from(value)
        .ok()
        .filter(|w| *w > 0)
        .ok_or_else(|| {
            to_py_err(Error::invalid_window(format!(
                "{name} must be a positive integer, got {value}"
            )))
        })
}

fn clean(values: Vec<Option<f64>>) -> Series {
    values.into_iter().map(|v| v.and_then(defined)).collect()
}

/// A list, tuple or pandas/numpy 1-D object as a series.
fn series_values(values: &Bound<'_, PyAny>) -> PyResult<Series> {
    if values.hasattr("tolist")? {
        return Ok(clean(values.call_method0("tolist")?.extract()?));
    }
    Ok(clean(values.extract()?))
}

/// One named column of `data`.
fn column_values(data: &Bound<'_, PyAny>, name: &str) -> PyResult<Series> {
    if !data.contains(name)? {
        return Err(to_py_err(Error::missing_column(name)));
    }
    series_values(&data.get_item(name)?)
}

fn table_of(data: &Bound<'_, PyAny>, names: &[&str]) -> PyResult<Table> {
    let mut table = Table::new();
    for name in names {
        table
            .insert(*name, column_values(data, name)?)
            .map_err(to_py_err)?;
    }
    Ok(table)
}

const OHLC: [&str; 3] = [columns::HIGH, columns::LOW, columns::CLOSE];

fn record_to_dict<'py>(py: Python<'py>, record: CalendarRecord) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("year", record.year)?;
    dict.set_item("quarter", record.quarter)?;
    dict.set_item("month_number", record.month_number)?;
    dict.set_item("month_name", record.month_name)?;
    dict.set_item("week_number", record.week_number)?;
    dict.set_item("day_of_week_number", record.day_of_week_number)?;
    dict.set_item("day_of_week_name", record.day_of_week_name)?;
    Ok(dict)
}

// ============================================================================
// Indicators
// ============================================================================

/// Day-over-day relative change of `close`.
#[pyfunction]
fn calculate_daily_returns(data: &Bound<'_, PyAny>) -> PyResult<Series> {
    let table = table_of(data, &[columns::CLOSE])?;
    daily_returns(&table).map_err(to_py_err)
}

/// Sample standard deviation of returns, rounded to 4 decimals.
#[pyfunction]
fn get_return_std_dev(returns: &Bound<'_, PyAny>) -> PyResult<Option<f64>> {
    Ok(return_std_dev(&series_values(returns)?))
}

/// Rolling sample standard deviation of returns.
#[pyfunction]
#[pyo3(signature = (returns, window = 20))]
fn get_rolling_volatility(returns: &Bound<'_, PyAny>, window: i64) -> PyResult<Series> {
    let window = self::window("window", window)?;
    rolling_volatility(&series_values(returns)?, window).map_err(to_py_err)
}

/// Average True Range.
#[pyfunction]
#[pyo3(signature = (data, window = 14))]
fn calculate_atr(data: &Bound<'_, PyAny>, window: i64) -> PyResult<Series> {
    let window = self::window("window", window)?;
    let table = table_of(data, &OHLC)?;
    atr(&table, window).map_err(to_py_err)
}

/// Ratio of a short ATR to a long ATR.
#[pyfunction]
#[pyo3(signature = (data, recent_window = 20, long_window = 50))]
fn calculate_volatility_ratio(
    data: &Bound<'_, PyAny>,
    recent_window: i64,
    long_window: i64,
) -> PyResult<Series> {
    let recent = window("recent_window", recent_window)?;
    let long = window("long_window", long_window)?;
    let table = table_of(data, &OHLC)?;
    volatility_ratio(&table, recent, long).map_err(to_py_err)
}

/// Bollinger Bands as a dict of `middle_band`, `upper_band`, `lower_band`.
#[pyfunction]
#[pyo3(signature = (data, window = 20, num_std_dev = 2.0))]
fn calculate_bollinger_bands<'py>(
    py: Python<'py>,
    data: &Bound<'py, PyAny>,
    window: i64,
    num_std_dev: f64,
) -> PyResult<Bound<'py, PyDict>> {
    let window = self::window("window", window)?;
    let table = table_of(data, &[columns::CLOSE])?;
    let bands = bollinger_bands(&table, window, num_std_dev).map_err(to_py_err)?;

    let dict = PyDict::new_bound(py);
    dict.set_item("middle_band", bands.middle_band)?;
    dict.set_item("upper_band", bands.upper_band)?;
    dict.set_item("lower_band", bands.lower_band)?;
    Ok(dict)
}

/// Band width relative to the middle band.
#[pyfunction]
#[pyo3(signature = (data, window = 20, num_std_dev = 2.0))]
fn calculate_bollinger_bands_width(
    data: &Bound<'_, PyAny>,
    window: i64,
    num_std_dev: f64,
) -> PyResult<Series> {
    let window = self::window("window", window)?;
    let table = table_of(data, &[columns::CLOSE])?;
    bollinger_band_width(&table, window, num_std_dev).map_err(to_py_err)
}

/// Day-over-day relative change of `volume`.
#[pyfunction(name = "volume_change")]
fn py_volume_change(data: &Bound<'_, PyAny>) -> PyResult<Series> {
    let table = table_of(data, &[columns::VOLUME])?;
    volume_change(&table).map_err(to_py_err)
}

/// Volume over its trailing mean.
#[pyfunction(name = "relative_volume_change")]
#[pyo3(signature = (data, window = 20))]
fn py_relative_volume_change(data: &Bound<'_, PyAny>, window: i64) -> PyResult<Series> {
    let window = self::window("window", window)?;
    let table = table_of(data, &[columns::VOLUME])?;
    relative_volume_change(&table, window).map_err(to_py_err)
}

/// Rolling least-squares slope of volume.
#[pyfunction]
#[pyo3(signature = (data, window = 20))]
fn calculate_volume_trend(data: &Bound<'_, PyAny>, window: i64) -> PyResult<Series> {
    let window = self::window("window", window)?;
    let table = table_of(data, &[columns::VOLUME])?;
    volume_trend(&table, window).map_err(to_py_err)
}

// ============================================================================
// Calendar
// ============================================================================

/// Calendar attributes of a `datetime` or a `YYYY-MM-DD HH:MM:SS` string.
///
/// Aware datetimes are decomposed on their local wall-clock fields.
#[pyfunction]
fn extract_date_components<'py>(
    py: Python<'py>,
    timestamp: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyDict>> {
    let input = if let Ok(text) = timestamp.extract::<String>() {
        TimestampInput::from(text)
    } else if let Ok(dt) = timestamp.downcast::<PyDateTime>() {
        let kwargs = PyDict::new_bound(py);
        kwargs.set_item("tzinfo", py.None())?;
        let naive = dt.call_method("replace", (), Some(&kwargs))?;
        TimestampInput::from(naive.extract::<NaiveDateTime>()?)
    } else {
        return Err(to_py_err(Error::invalid_timestamp_type(
            timestamp.get_type().to_string(),
        )));
    };

    let record = decompose(input).map_err(to_py_err)?;
    record_to_dict(py, record)
}

// ============================================================================
// Module Definition
// ============================================================================

/// OHLCV feature toolkit implemented in Rust.
#[pymodule]
fn ohlcv_features(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Indicators
    m.add_function(wrap_pyfunction!(calculate_daily_returns, m)?)?;
    m.add_function(wrap_pyfunction!(get_return_std_dev, m)?)?;
    m.add_function(wrap_pyfunction!(get_rolling_volatility, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_atr, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_volatility_ratio, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_bollinger_bands, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_bollinger_bands_width, m)?)?;
    m.add_function(wrap_pyfunction!(py_volume_change, m)?)?;
    m.add_function(wrap_pyfunction!(py_relative_volume_change, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_volume_trend, m)?)?;

    // Calendar
    m.add_function(wrap_pyfunction!(extract_date_components, m)?)?;

    Ok(())
}
