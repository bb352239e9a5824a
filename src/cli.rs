use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ashfall synthetic volcanic eruption forcing generator.
#[derive(Parser)]
#[command(
    name = "ashfall",
    version,
    about = "Synthetic volcanic eruption forcing generator"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate an eruption record set and its compact sidecar.
    Generate(GenerateArgs),
    /// List the available generators.
    List,
    /// Project a record set's eruption dates onto a monthly time axis.
    Resample(ResampleArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML configuration file (defaults to ./ashfall.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Generator index, see `ashfall list`.
    #[arg(short, long)]
    pub generator: Option<usize>,

    /// Number of eruptions to request.
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub size: Option<i64>,

    /// First year of the sequence.
    #[arg(short = 'y', long = "init-year", allow_negative_numbers = true)]
    pub init_year: Option<i64>,

    /// JSON eruption table for the file-driven generator.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `resample` subcommand.
#[derive(clap::Args)]
pub struct ResampleArgs {
    /// Record set Parquet file to read.
    pub file: PathBuf,

    /// First year of the monthly axis (defaults to the first eruption year).
    #[arg(long = "start-year", allow_negative_numbers = true)]
    pub start_year: Option<i32>,

    /// Year the axis runs up to (defaults to the year after the last eruption).
    #[arg(long = "end-year", allow_negative_numbers = true)]
    pub end_year: Option<i32>,

    /// Last month of the final year on the axis, e.g. `jun` or `june`.
    #[arg(short = 'l', long = "last-month")]
    pub last_month: Option<String>,

    /// Output path (defaults to `<stem>-linspace.parquet` next to the input).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
