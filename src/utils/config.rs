//! Configuration and constants for the pipeline.

use crate::utils::error::ConfigError;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Names for the classical baseline. The harness benchmarks exactly one
// classical configuration (ECIES encryption, ECDSA signatures, both on
// seckp256k1), so its directory names carry no algorithm part and these
// fixed labels stand in wherever a post-quantum row would name its pair.
pub const CLASSIC_PKE_SIG: &str = "ECIES+ECDSA(seckp256k1)";
pub const CLASSIC_PKE: &str = "ECIES(seckp256k1)";
pub const CLASSIC_SIG: &str = "ECDSA(seckp256k1)";

// Batch layout written by the harness under every leaf directory
pub const BASE_BATCH_DIR: &str = "base";
pub const NEW_BATCH_DIR: &str = "new";
pub const SAMPLE_FILE_NAME: &str = "sample.json";

// Output dataset file names (column contracts live in output::csv)
pub const PROTOCOL_DATA_FILE: &str = "data.csv";
pub const PRIMITIVE_DATA_FILE: &str = "data_primitives.csv";
pub const BANDWIDTH_DATA_FILE: &str = "data_bandwidth.csv";
pub const PROTOCOL_STATS_FILE: &str = "statistics_protocol.csv";
pub const PRIMITIVE_STATS_FILE: &str = "statistics_primitives.csv";
pub const MANIFEST_FILE: &str = "report_manifest.json";

/// Decimal digits kept in aggregated statistics
pub const STAT_PRECISION: i32 = 3;

// Default benchmark locations. Roots are directory-name prefixes resolved
// against the criterion directory: `Protocol` selects every sibling whose
// name starts with `Protocol`, e.g. `Protocol_PQ` and `Protocol_Classic`.
pub const DEFAULT_CRITERION_DIR: &str = "./target/criterion";
pub const PROTOCOL_PREFIX: &str = "Protocol";
pub const PRIMITIVE_PREFIXES: &[&str] = &["PKE", "SIG"];

/// Run configuration as written in a TOML config file.
///
/// Every field is optional; anything unset is derived from `criterion_dir`
/// (or its default) by [`ReportConfig::resolve`]. Explicit settings always
/// beat derived ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Criterion output directory holding the benchmark trees
    pub criterion_dir: Option<PathBuf>,
    /// Protocol family prefix (default `<criterion_dir>/Protocol`)
    pub protocol_root: Option<PathBuf>,
    /// Primitive family prefixes (default `<criterion_dir>/{PKE,SIG}`)
    pub primitive_roots: Option<Vec<PathBuf>>,
    /// Directory scanned for bandwidth tables (default `criterion_dir`)
    pub bandwidth_dir: Option<PathBuf>,
    /// Directory the datasets are written to (default `criterion_dir`)
    pub output_dir: Option<PathBuf>,
}

/// Resolved input and output locations for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub protocol_root: PathBuf,
    pub primitive_roots: Vec<PathBuf>,
    pub bandwidth_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ReportConfig {
    /// Fill unset fields from `criterion_dir`, falling back to the layout
    /// the harness produces under `./target/criterion`.
    pub fn resolve(&self) -> RunPaths {
        let base = self
            .criterion_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CRITERION_DIR));
        RunPaths {
            protocol_root: self
                .protocol_root
                .clone()
                .unwrap_or_else(|| base.join(PROTOCOL_PREFIX)),
            primitive_roots: self
                .primitive_roots
                .clone()
                .unwrap_or_else(|| PRIMITIVE_PREFIXES.iter().map(|p| base.join(p)).collect()),
            bandwidth_dir: self.bandwidth_dir.clone().unwrap_or_else(|| base.clone()),
            output_dir: self.output_dir.clone().unwrap_or(base),
        }
    }
}

impl Default for RunPaths {
    fn default() -> Self {
        ReportConfig::default().resolve()
    }
}

/// Load a run configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the TOML configuration file
///
/// # Errors
/// Returns `ConfigError` if the file cannot be read or parsed.
pub fn load_report_config(path: &Path) -> Result<ReportConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: ReportConfig = toml::from_str(&contents)?;
    debug!("Loaded run configuration from {}", path.display());
    Ok(config)
}
