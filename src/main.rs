//! AKE Bench Report CLI
//!
//! Turns raw criterion output from the AKE benchmark harness into the
//! flat CSV datasets and grouped statistics the plotting tools consume.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use std::path::PathBuf;

use ake_bench_report::commands::{execute_report, validate_args, ReportArgs};
use ake_bench_report::output::{
    read_bandwidth_records, read_manifest, read_primitive_rows, read_protocol_rows,
    read_stat_table,
};
use ake_bench_report::parser::Round;
use ake_bench_report::utils::config::SCHEMA_VERSION;

/// AKE Bench Report - benchmark dataset generation for the AKE suite
#[derive(Parser, Debug)]
#[command(name = "ake-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build every dataset from a criterion directory
    Report {
        /// Criterion directory holding the benchmark trees
        #[arg(short, long, env = "AKE_CRITERION_DIR")]
        root: Option<PathBuf>,

        /// TOML run configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for the datasets (defaults to the criterion dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a run summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a written dataset file
    Validate {
        /// Path to the dataset file
        #[arg(short, long)]
        file: PathBuf,

        /// Which dataset contract the file must satisfy
        #[arg(short, long, value_enum)]
        kind: DatasetKind,
    },

    /// Display dataset schema information
    Schema {
        /// Show full column details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

/// Dataset contracts the validate command understands
#[derive(ValueEnum, Clone, Copy, Debug)]
enum DatasetKind {
    Protocol,
    Primitives,
    Bandwidth,
    ProtocolStats,
    PrimitiveStats,
    Manifest,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Report {
            root,
            config,
            output,
            summary,
        } => {
            let args = ReportArgs {
                criterion_dir: root,
                config_file: config,
                output_dir: output,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            // Execute report
            execute_report(args)?;
        }

        Commands::Validate { file, kind } => {
            validate_dataset_file(file, kind)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a written dataset file against its contract
///
/// **Private** - internal command implementation
fn validate_dataset_file(file_path: PathBuf, kind: DatasetKind) -> Result<()> {
    println!("Validating dataset: {}", file_path.display());

    match kind {
        DatasetKind::Protocol => {
            let rows = read_protocol_rows(&file_path)?;
            println!("✓ Valid protocol dataset");
            println!("  Rows: {}", rows.len());
            let algorithms: std::collections::BTreeSet<_> =
                rows.iter().map(|row| row.algorithm.as_str()).collect();
            println!("  Algorithms: {}", algorithms.len());
        }
        DatasetKind::Primitives => {
            let rows = read_primitive_rows(&file_path)?;
            println!("✓ Valid primitive dataset");
            println!("  Rows: {}", rows.len());
        }
        DatasetKind::Bandwidth => {
            let records = read_bandwidth_records(&file_path)?;
            println!("✓ Valid bandwidth dataset");
            println!("  Configurations: {}", records.len());
        }
        DatasetKind::ProtocolStats | DatasetKind::PrimitiveStats => {
            let table = read_stat_table(&file_path)?;
            println!("✓ Valid statistics table");
            println!("  Columns: {}", table.columns.join(", "));
            println!("  Groups: {}", table.rows.len());
        }
        DatasetKind::Manifest => {
            let manifest = read_manifest(&file_path)?;
            println!("✓ Valid run manifest");
            println!("  Version: {}", manifest.version);
            println!("  Generated: {}", manifest.generated_at);
            println!("  Datasets: {}", manifest.datasets.len());
        }
    }

    Ok(())
}

/// Display dataset schema information
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("AKE Bench Report Dataset Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("data.csv                  - Protocol round observations");
        println!("  Algorithm: string       - PKE+SIG pair, or the classical baseline");
        println!("  Clients: number         - Simulated client count");
        println!("  Round: string           - Protocol phase name");
        println!("  Time: number            - One normalized observation");
        println!("  Kind: string            - PQ or CLASSIC");
        println!();
        println!("data_primitives.csv       - Primitive operation observations");
        println!("  Algorithm, Type (PKE/SIG), Operation, Time, Kind");
        println!();
        println!("data_bandwidth.csv        - Per-configuration byte totals");
        println!("  Kind, Algorithm, Clients, Bandwidth");
        println!();
        println!("statistics_protocol.csv   - Grouped by Algorithm, Clients, Round");
        println!("statistics_primitives.csv - Grouped by Algorithm, Type, Operation");
        println!("  *_mean, *_std (empty when Samples = 1), Samples");
        println!();
        println!("report_manifest.json      - Schema version, timestamp, row counts");
        println!();
        let rounds: Vec<&str> = Round::ALL.iter().map(|round| round.as_str()).collect();
        println!("Protocol rounds: {}", rounds.join(", "));
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("AKE Bench Report v{}", env!("CARGO_PKG_VERSION"));
    println!("Dataset Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Benchmark dataset generation for the anonymous AKE protocol suite.");
}
