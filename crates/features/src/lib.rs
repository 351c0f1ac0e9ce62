//! Indicator computation for the OHLCV feature toolkit.
//!
//! This crate handles:
//! - Daily returns and return dispersion
//! - Rolling volatility, Average True Range and volatility ratio
//! - Bollinger Bands and band width
//! - Volume change, relative volume and volume trend
//!
//! Every indicator borrows the input table and returns a new series aligned
//! row-for-row with it.

pub mod rolling;
pub mod regression;
pub mod returns;
pub mod volatility;
pub mod bands;
pub mod volume;
pub mod engine;

pub use bands::{bollinger_band_width, bollinger_bands, BollingerBands};
pub use engine::{FeatureEngine, FeatureSummary};
pub use returns::{daily_returns, return_std_dev};
pub use volatility::{atr, rolling_volatility, true_range, volatility_ratio};
pub use volume::{relative_volume_change, volume_change, volume_trend};
