//! Feature computation engine.
//!
//! Combines all indicators into a single pass that appends feature columns to
//! a copy of the input table.

use ohlcv_core::{IndicatorConfig, Result, Series, Table};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    bands::bollinger_bands,
    returns::{daily_returns, return_std_dev},
    rolling::count_defined,
    volatility::{atr, rolling_volatility, volatility_ratio},
    volume::{relative_volume_change, volume_change, volume_trend},
};

/// Names of the appended feature columns.
pub mod names {
    pub const DAILY_RETURN: &str = "daily_return";
    pub const ROLLING_VOLATILITY: &str = "rolling_volatility";
    pub const ATR: &str = "atr";
    pub const VOLATILITY_RATIO: &str = "volatility_ratio";
    pub const MIDDLE_BAND: &str = "middle_band";
    pub const UPPER_BAND: &str = "upper_band";
    pub const LOWER_BAND: &str = "lower_band";
    pub const BOLLINGER_WIDTH: &str = "bollinger_width";
    pub const VOLUME_CHANGE: &str = "volume_change";
    pub const RELATIVE_VOLUME_CHANGE: &str = "relative_volume_change";
    pub const VOLUME_TREND: &str = "volume_trend";

    /// Price-derived columns, in output order.
    pub const PRICE_FEATURES: [&str; 8] = [
        DAILY_RETURN,
        ROLLING_VOLATILITY,
        ATR,
        VOLATILITY_RATIO,
        MIDDLE_BAND,
        UPPER_BAND,
        LOWER_BAND,
        BOLLINGER_WIDTH,
    ];

    /// Volume-derived columns, in output order.
    pub const VOLUME_FEATURES: [&str; 3] = [VOLUME_CHANGE, RELATIVE_VOLUME_CHANGE, VOLUME_TREND];
}

/// Whole-sample statistics of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSummary {
    /// Rows in the table.
    pub rows: usize,
    /// Rows with a defined daily return.
    pub defined_returns: usize,
    /// Rounded sample standard deviation of daily returns.
    pub return_std_dev: Option<f64>,
}

/// Feature computation engine.
#[derive(Debug, Clone)]
pub struct FeatureEngine {
    config: IndicatorConfig,
}

impl FeatureEngine {
    /// Create a new feature engine from configuration.
    pub fn new(config: &IndicatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
        })
    }

    /// Indicator parameters in use.
    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Names of the columns [`FeatureEngine::compute`] appends.
    pub fn output_columns(&self) -> Vec<&'static str> {
        let mut out = names::PRICE_FEATURES.to_vec();
        if self.config.include_volume {
            out.extend(names::VOLUME_FEATURES);
        }
        out
    }

    /// Compute all configured features.
    ///
    /// Returns a copy of `table` with the feature columns appended after the
    /// original ones. The input is never modified; an input column that
    /// already carries a feature name is an [`ohlcv_core::Error::Data`].
    pub fn compute(&self, table: &Table) -> Result<Table> {
        let cfg = &self.config;
        let rows = table.len();

        let max_window = cfg.max_window();
        if rows < max_window {
            warn!(rows, max_window, "table is shorter than the largest window");
        }

        let returns = daily_returns(table)?;
        let volatility = rolling_volatility(&returns, cfg.rolling_volatility_window)?;
        let atr = atr(table, cfg.atr_window)?;
        let ratio = volatility_ratio(
            table,
            cfg.volatility_ratio_recent_window,
            cfg.volatility_ratio_long_window,
        )?;
        let bands = bollinger_bands(table, cfg.bollinger_window, cfg.bollinger_num_std_dev)?;
        let width = bands.width();

        let mut features: Vec<(&str, Series)> = vec![
            (names::DAILY_RETURN, returns),
            (names::ROLLING_VOLATILITY, volatility),
            (names::ATR, atr),
            (names::VOLATILITY_RATIO, ratio),
            (names::MIDDLE_BAND, bands.middle_band),
            (names::UPPER_BAND, bands.upper_band),
            (names::LOWER_BAND, bands.lower_band),
            (names::BOLLINGER_WIDTH, width),
        ];

        if cfg.include_volume {
            features.push((names::VOLUME_CHANGE, volume_change(table)?));
            features.push((
                names::RELATIVE_VOLUME_CHANGE,
                relative_volume_change(table, cfg.relative_volume_window)?,
            ));
            features.push((names::VOLUME_TREND, volume_trend(table, cfg.volume_trend_window)?));
        }

        let mut out = table.clone();
        for (name, series) in features {
            debug!(column = name, rows, defined = count_defined(&series), "computed feature");
            out.append(name, series)?;
        }

        info!(rows, columns = out.width(), "feature table ready");
        Ok(out)
    }

    /// Whole-sample return statistics.
    pub fn summary(&self, table: &Table) -> Result<FeatureSummary> {
        let returns = daily_returns(table)?;
        let summary = FeatureSummary {
            rows: table.len(),
            defined_returns: count_defined(&returns),
            return_std_dev: return_std_dev(&returns),
        };
        info!(
            rows = summary.rows,
            defined_returns = summary.defined_returns,
            return_std_dev = ?summary.return_std_dev,
            "return summary"
        );
        Ok(summary)
    }
}
