//! Per-configuration bandwidth extraction.
//!
//! The harness drops one CSV per experiment configuration into the
//! criterion directory, named `{kind}-{pke}-{sig}-{clients}.csv` and
//! holding raw per-message byte counts in whatever rows and columns the
//! protocol produced. Each table reduces to a single total.

use crate::parser::experiment::{decode_bandwidth_name, Kind};
use crate::utils::error::{BandwidthError, DecodeError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Total message bytes for one experiment configuration.
///
/// Field order is the column order of the `data_bandwidth.csv` contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BandwidthRecord {
    pub kind: Kind,
    pub algorithm: String,
    pub clients: u64,
    pub bandwidth: u64,
}

/// **Public** - scan a directory for bandwidth tables and total each one.
///
/// Only regular `.csv` files whose stem contains a `-` are considered;
/// that keeps this pipeline's own outputs (`data.csv`, `data_bandwidth.csv`
/// and friends, all underscore-named) out of the scan. Records come back
/// sorted by file name. A file that matches the filter but fails to decode
/// or parse aborts the run.
///
/// # Arguments
/// * `dir` - Directory holding the per-configuration CSV files
///
/// # Errors
/// Returns `BandwidthError` on listing failures, malformed file names,
/// unknown kind tokens, or non-numeric cells.
pub fn extract_bandwidth(dir: &Path) -> Result<Vec<BandwidthRecord>, BandwidthError> {
    info!("Extracting bandwidth tables from {}", dir.display());
    let mut files = Vec::new();
    let entries = fs::read_dir(dir).map_err(|source| BandwidthError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| BandwidthError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && is_bandwidth_table(&path) {
            files.push(path);
        }
    }
    files.sort();

    let mut records = Vec::new();
    for path in files {
        records.push(extract_one(&path)?);
    }
    info!("Extracted {} bandwidth records", records.len());
    Ok(records)
}

/// A bandwidth table is a `.csv` whose stem contains at least one `-`.
fn is_bandwidth_table(path: &Path) -> bool {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    let hyphenated_stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.contains('-'))
        .unwrap_or(false);
    is_csv && hyphenated_stem
}

fn extract_one(path: &Path) -> Result<BandwidthRecord, BandwidthError> {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| BandwidthError::MalformedName(path.display().to_string()))?;
    let key = decode_bandwidth_name(stem).map_err(|err| match err {
        DecodeError::MalformedPath(message) => BandwidthError::MalformedName(message),
        other => BandwidthError::Decode(other),
    })?;
    let bandwidth = sum_cells(path)?;
    debug!("{}: {} bytes", path.display(), bandwidth);
    Ok(BandwidthRecord {
        kind: key.kind,
        algorithm: key.algorithm,
        clients: key.clients,
        bandwidth,
    })
}

/// Total every numeric cell in the table. The tables carry no header row;
/// empty cells (e.g. from ragged rows) are skipped, anything else must
/// parse as a number. Fractional byte counts are truncated in the total.
fn sum_cells(path: &Path) -> Result<u64, BandwidthError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| BandwidthError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut total = 0.0_f64;
    for record in reader.records() {
        let record = record.map_err(|source| BandwidthError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        for cell in record.iter() {
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell.parse().map_err(|_| BandwidthError::NonNumeric {
                path: path.to_path_buf(),
                value: cell.to_string(),
            })?;
            total += value;
        }
    }
    Ok(total as u64)
}
