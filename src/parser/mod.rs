//! Benchmark name decoding and raw sample loading.
//!
//! This module handles:
//! - Decoding experiment identity from directory and file names
//! - Loading raw measurement batches
//! - Normalizing cumulative times to per-iteration observations

pub mod experiment;
pub mod sample;

// Re-export main types
pub use experiment::{
    decode_bandwidth_name, decode_primitive_leaf, decode_protocol_leaf, BandwidthKey,
    ExperimentKey, Kind, PrimitiveType, Round,
};
pub use sample::{load_batch, load_leaf_observations, RawBatch};
