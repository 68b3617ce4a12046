//! Report command implementation.
//!
//! The report command:
//! 1. Resolves the run configuration
//! 2. Builds the protocol observation dataset
//! 3. Builds the primitive observation dataset
//! 4. Extracts per-configuration bandwidth totals
//! 5. Aggregates grouped statistics
//! 6. Writes the CSV datasets and the run manifest

use crate::aggregator::{summarize, StatTable};
use crate::dataset::{
    build_primitive_dataset, build_protocol_dataset, extract_bandwidth, BandwidthRecord,
    PrimitiveRow, ProtocolRow, PRIMITIVE_STAT_GROUPING, PROTOCOL_STAT_GROUPING,
};
use crate::output::{
    write_bandwidth_records, write_manifest, write_primitive_rows, write_protocol_rows,
    write_stat_table, DatasetSummary, RunManifest,
};
use crate::utils::config::{
    load_report_config, ReportConfig, RunPaths, BANDWIDTH_DATA_FILE, MANIFEST_FILE,
    PRIMITIVE_DATA_FILE, PRIMITIVE_STATS_FILE, PROTOCOL_DATA_FILE, PROTOCOL_STATS_FILE,
};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    /// Criterion directory holding the benchmark trees (None = config/default)
    pub criterion_dir: Option<PathBuf>,

    /// Optional TOML run configuration file
    pub config_file: Option<PathBuf>,

    /// Output directory override
    pub output_dir: Option<PathBuf>,

    /// Print a run summary to stdout
    pub print_summary: bool,
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Report command arguments
///
/// # Returns
/// Ok if every dataset was built and written, Err with context otherwise
///
/// # Errors
/// * Benchmark tree traversal failures
/// * Malformed directory or file names
/// * Malformed sample or bandwidth files
/// * File write errors
pub fn execute_report(args: ReportArgs) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Resolve configuration
    info!("Step 1/6: Resolving run configuration...");
    let paths = resolve_paths(&args)?;
    debug!("Run paths: {:?}", paths);

    // Step 2: Protocol dataset
    info!("Step 2/6: Building protocol dataset...");
    let protocol_rows = build_protocol_dataset(&paths.protocol_root)
        .context("Failed to build protocol dataset")?;

    // Step 3: Primitive dataset
    info!("Step 3/6: Building primitive dataset...");
    let primitive_rows = build_primitive_dataset(&paths.primitive_roots)
        .context("Failed to build primitive dataset")?;

    // Step 4: Bandwidth tables
    info!("Step 4/6: Extracting bandwidth totals...");
    let bandwidth_records = extract_bandwidth(&paths.bandwidth_dir)
        .context("Failed to extract bandwidth tables")?;

    // Step 5: Grouped statistics
    info!("Step 5/6: Aggregating grouped statistics...");
    let protocol_stats = summarize(&protocol_rows, &PROTOCOL_STAT_GROUPING, ProtocolRow::TIME);
    let primitive_stats = summarize(&primitive_rows, &PRIMITIVE_STAT_GROUPING, PrimitiveRow::TIME);
    debug!(
        "Protocol groups: {}, primitive groups: {}",
        protocol_stats.rows.len(),
        primitive_stats.rows.len()
    );

    // Step 6: Write outputs
    info!("Step 6/6: Writing output files...");
    let out = &paths.output_dir;

    write_protocol_rows(&protocol_rows, out.join(PROTOCOL_DATA_FILE))
        .context("Failed to write protocol dataset")?;
    write_primitive_rows(&primitive_rows, out.join(PRIMITIVE_DATA_FILE))
        .context("Failed to write primitive dataset")?;
    write_bandwidth_records(&bandwidth_records, out.join(BANDWIDTH_DATA_FILE))
        .context("Failed to write bandwidth dataset")?;
    write_stat_table(&protocol_stats, out.join(PROTOCOL_STATS_FILE))
        .context("Failed to write protocol statistics")?;
    write_stat_table(&primitive_stats, out.join(PRIMITIVE_STATS_FILE))
        .context("Failed to write primitive statistics")?;

    let manifest = build_manifest(
        &protocol_rows,
        &primitive_rows,
        &bandwidth_records,
        &protocol_stats,
        &primitive_stats,
    );
    write_manifest(&manifest, out.join(MANIFEST_FILE)).context("Failed to write run manifest")?;

    info!("✓ Datasets written to: {}", out.display());

    if args.print_summary {
        print_run_summary(&manifest);
    }

    let elapsed = start_time.elapsed();
    info!("Report completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Resolve the run paths from config file, CLI flags, and defaults
///
/// **Private** - CLI flags beat the config file, which beats defaults
fn resolve_paths(args: &ReportArgs) -> Result<RunPaths> {
    let mut config = match &args.config_file {
        Some(path) => load_report_config(path)
            .with_context(|| format!("Failed to load run configuration {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if args.criterion_dir.is_some() {
        config.criterion_dir = args.criterion_dir.clone();
    }
    if args.output_dir.is_some() {
        config.output_dir = args.output_dir.clone();
    }
    Ok(config.resolve())
}

/// Assemble the manifest entries in the order the datasets were written
///
/// **Private** - internal helper for execute_report
fn build_manifest(
    protocol_rows: &[ProtocolRow],
    primitive_rows: &[PrimitiveRow],
    bandwidth_records: &[BandwidthRecord],
    protocol_stats: &StatTable,
    primitive_stats: &StatTable,
) -> RunManifest {
    RunManifest::new(vec![
        DatasetSummary {
            name: "protocol".to_string(),
            file: PROTOCOL_DATA_FILE.to_string(),
            rows: protocol_rows.len() as u64,
        },
        DatasetSummary {
            name: "primitives".to_string(),
            file: PRIMITIVE_DATA_FILE.to_string(),
            rows: primitive_rows.len() as u64,
        },
        DatasetSummary {
            name: "bandwidth".to_string(),
            file: BANDWIDTH_DATA_FILE.to_string(),
            rows: bandwidth_records.len() as u64,
        },
        DatasetSummary {
            name: "protocol_statistics".to_string(),
            file: PROTOCOL_STATS_FILE.to_string(),
            rows: protocol_stats.rows.len() as u64,
        },
        DatasetSummary {
            name: "primitive_statistics".to_string(),
            file: PRIMITIVE_STATS_FILE.to_string(),
            rows: primitive_stats.rows.len() as u64,
        },
    ])
}

/// Print a run summary to stdout
///
/// **Private** - only called when --summary is set
fn print_run_summary(manifest: &RunManifest) {
    println!("\n{}", "=".repeat(80));
    println!("RUN SUMMARY");
    println!("{}", "=".repeat(80));
    println!("Schema version: {}", manifest.version);
    for dataset in &manifest.datasets {
        println!("{:<24} {:>8} rows  ({})", dataset.name, dataset.rows, dataset.file);
    }
    println!("{}", "=".repeat(80));
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if let Some(dir) = &args.criterion_dir {
        if !dir.is_dir() {
            anyhow::bail!("Criterion directory does not exist: {}", dir.display());
        }
    }

    if let Some(config) = &args.config_file {
        if !config.is_file() {
            anyhow::bail!("Config file does not exist: {}", config.display());
        }
    }

    Ok(())
}
