//! Raw measurement batch loading and normalization.
//!
//! Each leaf directory holds two batches written by the harness, `base`
//! and `new`, and each batch is a `sample.json` with two parallel arrays:
//! `times[i]` is the wall time spent running the benchmark body `iters[i]`
//! times. Observations are the per-iteration quotients, so batches with
//! different iteration counts remain comparable.

use crate::utils::config::{BASE_BATCH_DIR, NEW_BATCH_DIR, SAMPLE_FILE_NAME};
use crate::utils::error::SampleError;
use log::trace;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One raw measurement batch as recorded by the harness.
///
/// Unknown fields (e.g. the sampling mode tag) are ignored; only the two
/// parallel arrays matter here.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBatch {
    pub iters: Vec<f64>,
    pub times: Vec<f64>,
}

impl RawBatch {
    /// Normalize to per-iteration times, `times[i] / iters[i]`.
    ///
    /// Assumes the batch passed validation; `load_batch` is the checked
    /// entry point.
    pub fn per_iteration_times(&self) -> Vec<f64> {
        self.iters
            .iter()
            .zip(&self.times)
            .map(|(iters, time)| time / iters)
            .collect()
    }
}

/// **Public** - load one batch file and normalize it to per-iteration times.
///
/// # Arguments
/// * `path` - Path to a `sample.json` batch file
///
/// # Errors
/// Returns `SampleError` if the file cannot be read or parsed, if the two
/// arrays differ in length, or if any iteration count is zero or negative
/// (a zero count would turn normalization into a division by zero).
pub fn load_batch(path: &Path) -> Result<Vec<f64>, SampleError> {
    let file = File::open(path).map_err(|source| SampleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let batch: RawBatch = serde_json::from_reader(reader).map_err(|source| SampleError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if batch.iters.len() != batch.times.len() {
        return Err(SampleError::LengthMismatch {
            path: path.to_path_buf(),
            iters: batch.iters.len(),
            times: batch.times.len(),
        });
    }
    if let Some(index) = batch.iters.iter().position(|&iters| iters <= 0.0) {
        return Err(SampleError::NonPositiveIters {
            path: path.to_path_buf(),
            index,
        });
    }

    trace!("Loaded {} samples from {}", batch.iters.len(), path.display());
    Ok(batch.per_iteration_times())
}

/// **Public** - load and concatenate both batches under a leaf directory.
///
/// The harness writes a `base` and a `new` batch for every configuration;
/// observations from both belong to the same experiment, `base` first.
///
/// # Errors
/// Returns `SampleError` if either batch is missing or malformed. A leaf
/// with only one batch is malformed output and fails the build.
pub fn load_leaf_observations(leaf: &Path) -> Result<Vec<f64>, SampleError> {
    let mut samples = load_batch(&leaf.join(BASE_BATCH_DIR).join(SAMPLE_FILE_NAME))?;
    samples.extend(load_batch(&leaf.join(NEW_BATCH_DIR).join(SAMPLE_FILE_NAME))?);
    Ok(samples)
}
