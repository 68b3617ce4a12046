//! CSV dataset writers and readers.
//!
//! The header constants below are the column contract consumed by the
//! plotting tools; the row structs' serde field order must stay in step
//! with them (pinned by tests). Headers are always written explicitly so
//! an empty dataset still produces a header-only file.

use crate::aggregator::{StatRow, StatTable};
use crate::dataset::{BandwidthRecord, PrimitiveRow, ProtocolRow};
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Column contract for `data.csv`
pub const PROTOCOL_HEADER: [&str; 5] = ["Algorithm", "Clients", "Round", "Time", "Kind"];
/// Column contract for `data_primitives.csv`
pub const PRIMITIVE_HEADER: [&str; 5] = ["Algorithm", "Type", "Operation", "Time", "Kind"];
/// Column contract for `data_bandwidth.csv`
pub const BANDWIDTH_HEADER: [&str; 4] = ["Kind", "Algorithm", "Clients", "Bandwidth"];

/// Write the protocol observation table
///
/// **Public** - main entry point for `data.csv`
pub fn write_protocol_rows(
    rows: &[ProtocolRow],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_table(rows, &PROTOCOL_HEADER, output_path.as_ref())
}

/// Write the primitive observation table (`data_primitives.csv`)
pub fn write_primitive_rows(
    rows: &[PrimitiveRow],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_table(rows, &PRIMITIVE_HEADER, output_path.as_ref())
}

/// Write the bandwidth table (`data_bandwidth.csv`)
pub fn write_bandwidth_records(
    records: &[BandwidthRecord],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_table(records, &BANDWIDTH_HEADER, output_path.as_ref())
}

/// Read the protocol observation table back
///
/// **Public** - useful for validation, plotting, and testing
pub fn read_protocol_rows(input_path: impl AsRef<Path>) -> Result<Vec<ProtocolRow>, OutputError> {
    read_table(input_path.as_ref())
}

/// Read the primitive observation table back
pub fn read_primitive_rows(input_path: impl AsRef<Path>) -> Result<Vec<PrimitiveRow>, OutputError> {
    read_table(input_path.as_ref())
}

/// Read the bandwidth table back
pub fn read_bandwidth_records(
    input_path: impl AsRef<Path>,
) -> Result<Vec<BandwidthRecord>, OutputError> {
    read_table(input_path.as_ref())
}

/// Write an aggregated statistics table
///
/// **Public** - entry point for `statistics_protocol.csv` and
/// `statistics_primitives.csv`
///
/// # Arguments
/// * `table` - Aggregated table to write
/// * `output_path` - Path to the output CSV file
///
/// # Errors
/// * `OutputError::CsvFailed` - CSV serialization error
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_stat_table(
    table: &StatTable,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    validate_output_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        let mut record: Vec<String> = row.key.clone();
        record.push(row.mean.to_string());
        // An undefined std (single observation) stays an empty cell.
        record.push(row.std.map(|std| std.to_string()).unwrap_or_default());
        record.push(row.count.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!(
        "Wrote {} aggregated rows to {}",
        table.rows.len(),
        output_path.display()
    );
    Ok(())
}

/// Read an aggregated statistics table back
///
/// The three trailing columns are always `{value}_mean`, `{value}_std`
/// and `Samples`; everything before them is the grouping key.
pub fn read_stat_table(input_path: impl AsRef<Path>) -> Result<StatTable, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading statistics table from {}", input_path.display());

    let mut reader = csv::Reader::from_path(input_path)?;
    let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    if columns.len() < 4 {
        return Err(OutputError::InvalidFormat {
            path: input_path.to_path_buf(),
            reason: format!(
                "expected at least one key column plus three summary columns, found {}",
                columns.len()
            ),
        });
    }
    let key_width = columns.len() - 3;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != columns.len() {
            return Err(OutputError::InvalidFormat {
                path: input_path.to_path_buf(),
                reason: format!(
                    "row has {} fields, header has {}",
                    record.len(),
                    columns.len()
                ),
            });
        }
        let key = record.iter().take(key_width).map(String::from).collect();
        let mean = parse_float(&record[key_width], input_path)?;
        let std_cell = &record[key_width + 1];
        let std = if std_cell.is_empty() {
            None
        } else {
            Some(parse_float(std_cell, input_path)?)
        };
        let count = record[key_width + 2].parse::<u64>().map_err(|_| {
            OutputError::InvalidFormat {
                path: input_path.to_path_buf(),
                reason: format!("sample count {:?} is not an integer", &record[key_width + 2]),
            }
        })?;
        rows.push(StatRow { key, mean, std, count });
    }
    Ok(StatTable { columns, rows })
}

fn parse_float(cell: &str, path: &Path) -> Result<f64, OutputError> {
    cell.parse::<f64>().map_err(|_| OutputError::InvalidFormat {
        path: path.to_path_buf(),
        reason: format!("{:?} is not a number", cell),
    })
}

/// Shared row-table writer
///
/// **Private** - header first, then one serialized record per row
fn write_table<T: Serialize>(rows: &[T], header: &[&str], path: &Path) -> Result<(), OutputError> {
    validate_output_path(path)?;
    ensure_parent_dir(path)?;

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, OutputError> {
    debug!("Reading dataset from {}", path.display());
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(rows)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create parent directories if needed
///
/// **Private** - internal utility
fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
