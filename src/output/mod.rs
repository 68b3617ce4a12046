//! Output writers for the derived datasets.
//!
//! This module handles writing pipeline results to disk:
//! - Observation and statistics tables as CSV
//! - The versioned run manifest as JSON

pub mod csv;
pub mod manifest;

// Re-export main functions
pub use self::csv::{
    read_bandwidth_records, read_primitive_rows, read_protocol_rows, read_stat_table,
    write_bandwidth_records, write_primitive_rows, write_protocol_rows, write_stat_table,
    BANDWIDTH_HEADER, PRIMITIVE_HEADER, PROTOCOL_HEADER,
};
pub use manifest::{read_manifest, write_manifest, DatasetSummary, RunManifest};
