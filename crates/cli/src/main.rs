//! `ohlcv-features` command-line driver.

mod cli;
mod logging;
mod pipeline;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use pipeline::Stage;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(&cli.log_level);

    let (stage, paths) = match cli.command {
        Commands::Indicators(paths) => (Stage::Indicators, paths),
        Commands::Calendar(paths) => (Stage::Calendar, paths),
        Commands::All(paths) => (Stage::All, paths),
    };

    let config = pipeline::load_config(paths.config.as_deref())?;
    pipeline::run(&paths.input, &paths.output, stage, &config)
}
