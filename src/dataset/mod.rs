//! Observation dataset construction.
//!
//! This module walks the benchmark output trees and assembles the flat
//! tables the rest of the pipeline consumes:
//! - Protocol round timings (one row per observation)
//! - Primitive operation timings
//! - Per-configuration bandwidth totals

pub mod bandwidth;
pub mod primitive;
pub mod protocol;
pub mod walk;

// Re-export main types
pub use bandwidth::{extract_bandwidth, BandwidthRecord};
pub use primitive::{build_primitive_dataset, PrimitiveRow, PRIMITIVE_STAT_GROUPING};
pub use protocol::{build_protocol_dataset, ProtocolRow, PROTOCOL_STAT_GROUPING};
pub use walk::{family_dirs, leaf_dirs};
