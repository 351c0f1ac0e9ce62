//! Core types and configuration for the OHLCV feature toolkit.
//!
//! This crate provides shared types used across all other crates:
//! - The columnar price/volume table and derived series
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, IndicatorConfig, IoConfig};
pub use error::{Error, Result, TIMESTAMP_PATTERN};
pub use types::*;
