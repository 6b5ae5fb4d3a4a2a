mod compare;
mod normalize;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kosar")]
#[command(about = "Grocery catalogue normalization and comparison tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize a scraped catalogue into the common product layout
    Normalize {
        /// Raw catalogue CSV (defaults to the newest `all_data` file)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output CSV (defaults to `normalized_data` with the input's stamp)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Directory holding the override tables
        #[arg(long)]
        overrides: Option<PathBuf>,
    },
    /// Copy a catalogue CSV without its irrelevant columns
    Filter {
        /// Raw catalogue CSV
        #[arg(long)]
        input: PathBuf,
        /// Output CSV
        #[arg(long)]
        output: PathBuf,
        /// YAML file listing the columns to drop
        #[arg(long)]
        columns: Option<PathBuf>,
    },
    /// Filter and normalize the newest raw catalogue of the configured market
    Pipeline,
    /// Cross-check two product CSVs by barcode, name and price
    Compare(compare::CompareArgs),
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = kosar_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Normalize {
            input,
            output,
            overrides,
        } => normalize::run_normalize(
            &config,
            input.as_deref(),
            output.as_deref(),
            overrides.as_deref(),
        ),
        Commands::Filter {
            input,
            output,
            columns,
        } => normalize::run_filter(&config, &input, &output, columns.as_deref()),
        Commands::Pipeline => normalize::run_pipeline(&config),
        Commands::Compare(args) => compare::run_compare(&args),
    }
}
