//! Error types for the entire pipeline.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//! Every error below is fatal for a run: the pipeline aborts instead of
//! emitting a silently-incomplete dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding benchmark paths and file names
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Path does not match any benchmark naming convention: {0}")]
    MalformedPath(String),

    #[error("Unknown experiment kind token: {0:?}")]
    UnknownExperimentKind(String),
}

/// Errors that can occur while loading a raw sample file
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("Failed to read sample file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid sample JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Sample arrays differ in length in {path}: {iters} iters vs {times} times")]
    LengthMismatch {
        path: PathBuf,
        iters: usize,
        times: usize,
    },

    #[error("Iteration count at index {index} in {path} is not strictly positive")]
    NonPositiveIters { path: PathBuf, index: usize },
}

/// Errors that can occur while building an observation dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error("Failed to scan benchmark tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Expected a configuration directory at leaf depth, found a file: {0}")]
    UnexpectedEntry(PathBuf),
}

/// Errors that can occur while extracting bandwidth tables
#[derive(Error, Debug)]
pub enum BandwidthError {
    #[error("Bandwidth file name does not match {{kind}}-{{pke}}-{{sig}}-{{clients}}: {0}")]
    MalformedName(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Failed to list bandwidth directory {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse bandwidth file {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Non-numeric bandwidth value {value:?} in {path}")]
    NonNumeric { path: PathBuf, value: String },
}

/// Errors that can occur during dataset output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("CSV serialization failed: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Invalid table format in {path}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },
}

/// Errors that can occur while loading run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),
}
