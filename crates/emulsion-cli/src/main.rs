//! emulsion - analog film simulation CLI

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "emulsion")]
#[command(author, version, about = "Analog film simulation for digital images")]
#[command(long_about = "
Applies film stock profiles (color science, tone, scan artifacts, grain,
defects) to PNG/JPEG images, deterministically.

Examples:
  emulsion stocks                                # List built-in stocks
  emulsion apply photo.jpg -o out.jpg --stock classic-negative
  emulsion apply photo.png -o out.png --profile look.json --lut print.cube
  emulsion apply photo.png -o out.png --stock warm-portrait --seed-salt 3
  emulsion histogram out.jpg                     # Channel stats as JSON
  emulsion lut print.cube                        # Validate/inspect a LUT
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a film profile to an image
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Compute histogram and monochrome analysis of an image
    #[command(visible_alias = "hist")]
    Histogram(HistogramArgs),

    /// Validate and inspect a .cube LUT file
    Lut(LutArgs),

    /// List built-in film stocks
    Stocks(StocksArgs),
}

#[derive(Args)]
struct ApplyArgs {
    /// Input image (PNG or JPEG)
    input: PathBuf,

    /// Output image path; format follows the extension
    #[arg(short, long)]
    output: PathBuf,

    /// Profile JSON file
    #[arg(short, long, conflicts_with = "stock")]
    profile: Option<PathBuf>,

    /// Built-in stock id (see `emulsion stocks`)
    #[arg(short, long)]
    stock: Option<String>,

    /// Per-asset override JSON file
    #[arg(long = "override", value_name = "FILE")]
    overrides: Option<PathBuf>,

    /// Split-toning grade JSON file, applied after the module pipeline
    #[arg(short, long)]
    grade: Option<PathBuf>,

    /// .cube LUT referenced by the profile's colorScience module
    #[arg(short, long)]
    lut: Option<PathBuf>,

    /// Seed key for perAsset noise; defaults to the input file name
    #[arg(long)]
    seed_key: Option<String>,

    /// Perturbs perAsset noise without changing the key
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    seed_salt: i64,

    /// Seed for perRender noise (defects)
    #[arg(long, default_value = "0")]
    render_seed: u64,

    /// Export seed; overrides the render seed for perRender noise
    #[arg(long)]
    export_seed: Option<u64>,
}

#[derive(Args)]
struct HistogramArgs {
    /// Input image (PNG or JPEG)
    input: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Report as monochrome regardless of detection
    #[arg(long)]
    force_monochrome: bool,
}

#[derive(Args)]
struct LutArgs {
    /// .cube file to validate
    input: PathBuf,

    /// Rewrite the LUT in canonical form to this path
    #[arg(long, value_name = "FILE")]
    emit: Option<PathBuf>,
}

#[derive(Args)]
struct StocksArgs {
    /// Print full profiles as JSON instead of an id/name table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Histogram(args) => commands::histogram::run(args),
        Commands::Lut(args) => commands::lut::run(args),
        Commands::Stocks(args) => commands::stocks::run(args),
    }
}
