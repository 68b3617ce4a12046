//! Run manifest output.
//!
//! A small JSON summary written next to the datasets so downstream tooling
//! can check schema compatibility and row counts without re-reading the
//! CSVs.

use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level manifest structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    /// Schema version for compatibility checking
    pub version: String,
    /// ISO 8601 timestamp of when the run finished
    pub generated_at: String,
    /// One entry per dataset the run wrote
    pub datasets: Vec<DatasetSummary>,
}

/// Row count and location of one written dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Dataset name, e.g. "protocol" or "primitive_statistics"
    pub name: String,
    /// File name the dataset was written to
    pub file: String,
    /// Number of data rows, excluding the header
    pub rows: u64,
}

impl RunManifest {
    /// Create a manifest stamped with the current schema version and time
    pub fn new(datasets: Vec<DatasetSummary>) -> Self {
        RunManifest {
            version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            datasets,
        }
    }

    /// Look up a dataset entry by name
    pub fn dataset(&self, name: &str) -> Option<&DatasetSummary> {
        self.datasets.iter().find(|summary| summary.name == name)
    }
}

/// Write a run manifest to a JSON file
///
/// **Public** - main entry point for manifest output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
pub fn write_manifest(
    manifest: &RunManifest,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing run manifest to {}", output_path.display());

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, manifest).map_err(OutputError::SerializationFailed)?;
    Ok(())
}

/// Read a run manifest from a JSON file
///
/// **Public** - useful for validation and testing
pub fn read_manifest(input_path: impl AsRef<Path>) -> Result<RunManifest, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading run manifest from {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let manifest: RunManifest = serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;
    debug!(
        "Manifest loaded: version {}, {} datasets",
        manifest.version,
        manifest.datasets.len()
    );
    Ok(manifest)
}
