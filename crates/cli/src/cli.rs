use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Derive indicator and calendar features from OHLCV files")]
pub struct Cli {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append price and volume indicators
    Indicators(Paths),

    /// Append calendar attributes of the timestamp column
    Calendar(Paths),

    /// Append calendar attributes, then indicators
    All(Paths),
}

#[derive(Args)]
pub struct Paths {
    /// Input CSV file with a header row
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output CSV file, overwritten if present
    #[arg(short, long)]
    pub output: PathBuf,

    /// JSON configuration file; defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommand() {
        let cli = Cli::try_parse_from([
            "ohlcv-features",
            "all",
            "--input",
            "in.csv",
            "--output",
            "out.csv",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.log_level, "debug");
        match cli.command {
            Commands::All(paths) => {
                assert_eq!(paths.input, PathBuf::from("in.csv"));
                assert!(paths.config.is_none());
            }
            _ => panic!("expected the all subcommand"),
        }
    }

    #[test]
    fn test_output_required() {
        assert!(Cli::try_parse_from(["ohlcv-features", "calendar", "-i", "in.csv"]).is_err());
    }
}
