//! Command-line interface argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Combine the monthly municipal affiliation extracts into one dataset and
/// produce the yearly average tables.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Base directory holding `src_data/` and `out_data/`
    #[arg(default_value = ".", value_name = "DIR")]
    pub base_dir: PathBuf,

    /// Directory of source spreadsheets (defaults to `<base>/src_data`)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory for the output tables (defaults to `<base>/out_data`)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Re-aggregate from an existing `all_data.csv` instead of re-ingesting
    /// the source spreadsheets
    #[arg(long)]
    pub from_checkpoint: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join("src_data"))
    }

    pub fn out_dir(&self) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join("out_data"))
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
