//! Load → transform → save.

use std::path::Path;

use anyhow::{Context, Result};
use ohlcv_calendar::append_calendar_columns;
use ohlcv_core::{Config, Table};
use ohlcv_features::FeatureEngine;
use ohlcv_ingestion::{read_table, write_table};
use tracing::info;

/// Which column groups to append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Indicators,
    Calendar,
    All,
}

/// Configuration from `path`, or defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Append the columns of `stage` to a copy of `table`.
pub fn transform(table: &Table, stage: Stage, config: &Config) -> Result<Table> {
    let mut out = table.clone();

    if matches!(stage, Stage::Calendar | Stage::All) {
        out = append_calendar_columns(&out, &config.io.timestamp_key())
            .context("Failed to decompose timestamps")?;
    }

    if matches!(stage, Stage::Indicators | Stage::All) {
        let engine = FeatureEngine::new(&config.indicators)?;
        engine.summary(&out)?;
        out = engine.compute(&out).context("Failed to compute indicators")?;
    }

    Ok(out)
}

/// Read `input`, transform it and write `output`.
pub fn run(input: &Path, output: &Path, stage: Stage, config: &Config) -> Result<()> {
    let table = read_table(input, &config.io)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let out = transform(&table, stage, config)?;
    write_table(output, &out).with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        stage = ?stage,
        added_columns = out.width() - table.width(),
        "done"
    );
    Ok(())
}
