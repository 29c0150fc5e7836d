//! Command-line arguments.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Mirror a music library into a single target codec.
///
/// Every file under the INPUT paths is placed at the same position relative
/// to BASE_DIR inside the output directory. Files already in the target
/// codec are copied, other supported formats are transcoded, and anything
/// else is skipped. Existing outputs are never overwritten.
#[derive(Debug, Parser)]
#[command(name = "transmirror", version)]
pub struct Args {
    /// Directory whose layout the output tree mirrors.
    pub base_dir: PathBuf,

    /// Files or directories inside BASE_DIR to convert.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Root of the output tree.
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// TOML configuration file.
    #[arg(short, long, env = "TRANSMIRROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of workers (default: twice the CPU count).
    #[arg(short, long, value_parser = parse_jobs)]
    pub jobs: Option<usize>,

    /// Resolve and classify every file without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Write Prometheus text metrics to this file after the batch.
    #[arg(long)]
    pub metrics_file: Option<PathBuf>,

    /// More logging (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Log as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn parse_jobs(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
