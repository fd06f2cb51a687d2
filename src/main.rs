//! `fid-report` command line entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use fid_report::config::{
    OutputFormat, ReportConfig, DEFAULT_KIMG_PER_CHECKPOINT, DEFAULT_OUTPUT, DEFAULT_ROOT,
    DEFAULT_SHEET,
};
use fid_report::report::run_report;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Xlsx,
    Csv,
    Parquet,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => Self::Xlsx,
            FormatArg::Csv => Self::Csv,
            FormatArg::Parquet => Self::Parquet,
        }
    }
}

/// Collect FID metrics, timing stats and training options of every run into one table.
#[derive(Debug, Parser)]
#[command(name = "fid-report", version, about)]
struct Cli {
    /// Directory containing one sub-directory per training run
    #[arg(default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Worksheet name (xlsx only)
    #[arg(long, default_value = DEFAULT_SHEET)]
    sheet: String,

    /// Output format (defaults to the output file extension, then xlsx)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// kimg trained between two metric snapshots
    #[arg(long, default_value_t = DEFAULT_KIMG_PER_CHECKPOINT, allow_hyphen_values = true)]
    kimg_per_checkpoint: i64,

    /// Sort runs by directory name instead of filesystem order
    #[arg(long)]
    sort: bool,

    /// Log per-run details
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut builder = ReportConfig::builder(&cli.root)
        .output(&cli.output)
        .sheet_name(cli.sheet)
        .kimg_per_checkpoint(cli.kimg_per_checkpoint)
        .sort_runs(cli.sort);
    if let Some(format) = cli.format {
        builder = builder.format(format.into());
    }
    let config = builder.build();

    let table = run_report(&config)
        .with_context(|| format!("failed to build report from {}", cli.root.display()))?;
    println!(
        "Wrote {} runs ({} columns) to {}",
        table.len(),
        table.columns().len(),
        config.output().display()
    );
    Ok(())
}
