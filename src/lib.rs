//! AKE Bench Report
//!
//! Benchmark-results ingestion and aggregation for the anonymous
//! authenticated key exchange protocol suite.
//!
//! This crate provides the core implementation for the `ake-report` CLI
//! tool: it decodes experiment identity out of the harness's directory
//! naming convention, normalizes raw timing samples to per-iteration
//! observations, totals per-configuration bandwidth tables, and writes
//! the flat datasets and grouped statistics the plotting tools consume.

pub mod aggregator;
pub mod commands;
pub mod dataset;
pub mod output;
pub mod parser;
pub mod utils;
