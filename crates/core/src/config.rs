//! Configuration structures for the feature toolkit.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Indicator windows and parameters.
    pub indicators: IndicatorConfig,
    /// Flat-file layout.
    pub io: IoConfig,
}

impl Config {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.indicators.validate()?;
        self.io.validate()
    }
}

/// Indicator parameters. Windows count rows, not calendar days.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Window for rolling standard deviation of daily returns.
    pub rolling_volatility_window: usize,
    /// Window for the Average True Range.
    pub atr_window: usize,
    /// Numerator ATR window of the volatility ratio.
    pub volatility_ratio_recent_window: usize,
    /// Denominator ATR window of the volatility ratio.
    pub volatility_ratio_long_window: usize,
    /// Window for Bollinger Bands.
    pub bollinger_window: usize,
    /// Band offset in standard deviations.
    pub bollinger_num_std_dev: f64,
    /// Window for the trailing mean of relative volume change.
    pub relative_volume_window: usize,
    /// Window for the rolling volume slope.
    pub volume_trend_window: usize,
    /// Compute volume indicators (requires a `volume` column).
    pub include_volume: bool,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rolling_volatility_window: 20,
            atr_window: 14,
            volatility_ratio_recent_window: 20,
            volatility_ratio_long_window: 50,
            bollinger_window: 20,
            bollinger_num_std_dev: 2.0,
            relative_volume_window: 20,
            volume_trend_window: 20,
            include_volume: true,
        }
    }
}

impl IndicatorConfig {
    /// Reject zero windows and unusable band multipliers.
    pub fn validate(&self) -> Result<()> {
        let windows = [
            ("rolling_volatility_window", self.rolling_volatility_window),
            ("atr_window", self.atr_window),
            ("volatility_ratio_recent_window", self.volatility_ratio_recent_window),
            ("volatility_ratio_long_window", self.volatility_ratio_long_window),
            ("bollinger_window", self.bollinger_window),
            ("relative_volume_window", self.relative_volume_window),
            ("volume_trend_window", self.volume_trend_window),
        ];
        for (name, window) in windows {
            if window == 0 {
                return Err(Error::invalid_window(format!("{name} must be a positive integer")));
            }
        }

        let k = self.bollinger_num_std_dev;
        if !k.is_finite() || k < 0.0 {
            return Err(Error::invalid_parameter(format!(
                "bollinger_num_std_dev must be a finite non-negative number, got {k}"
            )));
        }
        Ok(())
    }

    /// Largest window any configured indicator needs before it is defined.
    pub fn max_window(&self) -> usize {
        let mut max = self
            .rolling_volatility_window
            .max(self.atr_window)
            .max(self.volatility_ratio_recent_window)
            .max(self.volatility_ratio_long_window)
            .max(self.bollinger_window);
        if self.include_volume {
            max = max
                .max(self.relative_volume_window)
                .max(self.volume_trend_window);
        }
        max
    }
}

/// Flat-file layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Name of the date/time column.
    pub timestamp_column: String,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            timestamp_column: crate::types::columns::TIMESTAMP.to_string(),
        }
    }
}

impl IoConfig {
    /// Timestamp column name as it appears in a loaded table (trimmed,
    /// lower-cased like every CSV header).
    pub fn timestamp_key(&self) -> String {
        self.timestamp_column.trim().to_lowercase()
    }

    fn validate(&self) -> Result<()> {
        if self.timestamp_column.trim().is_empty() {
            return Err(Error::config("timestamp_column must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.indicators.atr_window, 14);
        assert_eq!(config.indicators.bollinger_num_std_dev, 2.0);
        assert_eq!(config.io.timestamp_column, "timestamp");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json_str(r#"{"indicators": {"atr_window": 7}}"#).unwrap();
        assert_eq!(config.indicators.atr_window, 7);
        assert_eq!(config.indicators.bollinger_window, 20);
        assert!(config.indicators.include_volume);
    }

    #[test]
    fn test_zero_window_rejected() {
        let result = Config::from_json_str(r#"{"indicators": {"bollinger_window": 0}}"#);
        assert!(matches!(result, Err(Error::InvalidWindow(msg)) if msg.contains("bollinger_window")));
    }

    #[test]
    fn test_negative_std_dev_rejected() {
        let result = Config::from_json_str(r#"{"indicators": {"bollinger_num_std_dev": -1.0}}"#);
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_negative_window_is_json_error() {
        let result = Config::from_json_str(r#"{"indicators": {"atr_window": -3}}"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_timestamp_key_normalised() {
        let config = Config::from_json_str(r#"{"io": {"timestamp_column": " Date "}}"#).unwrap();
        assert_eq!(config.io.timestamp_key(), "date");
        assert_eq!(IoConfig::default().timestamp_key(), "timestamp");
    }

    #[test]
    fn test_max_window() {
        let mut config = IndicatorConfig::default();
        assert_eq!(config.max_window(), 50);
        config.include_volume = false;
        config.volatility_ratio_long_window = 10;
        assert_eq!(config.max_window(), 20);
    }
}
