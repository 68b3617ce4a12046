//! Aggregation of observation tables into summary statistics.
//!
//! This module transforms flat observation rows into:
//! - Grouped summary tables (mean, sample std, count per key)
//! - The scalar statistics backing them

pub mod stats;
pub mod summary;

// Re-export main types and functions
pub use stats::{mean, round_to, sample_std};
pub use summary::{summarize, Column, StatRow, StatTable, ValueColumn};
