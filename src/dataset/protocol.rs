//! Protocol round observation dataset.

use crate::aggregator::{Column, ValueColumn};
use crate::dataset::walk::{family_dirs, leaf_dirs};
use crate::parser::experiment::{decode_protocol_leaf, ExperimentKey, Kind, Round};
use crate::parser::sample::load_leaf_observations;
use crate::utils::error::{DatasetError, DecodeError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One protocol round timing observation.
///
/// Field order is the column order of the `data.csv` contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProtocolRow {
    pub algorithm: String,
    pub clients: u64,
    pub round: Round,
    pub time: f64,
    pub kind: Kind,
}

impl ProtocolRow {
    pub const ALGORITHM: Column<Self> = Column {
        name: "Algorithm",
        get: Self::algorithm_field,
    };
    pub const CLIENTS: Column<Self> = Column {
        name: "Clients",
        get: Self::clients_field,
    };
    pub const ROUND: Column<Self> = Column {
        name: "Round",
        get: Self::round_field,
    };
    pub const TIME: ValueColumn<Self> = ValueColumn {
        name: "Time",
        get: Self::time_field,
    };

    fn algorithm_field(row: &Self) -> String {
        row.algorithm.clone()
    }

    fn clients_field(row: &Self) -> String {
        row.clients.to_string()
    }

    fn round_field(row: &Self) -> String {
        row.round.to_string()
    }

    fn time_field(row: &Self) -> f64 {
        row.time
    }
}

/// Grouping used for `statistics_protocol.csv`.
pub const PROTOCOL_STAT_GROUPING: [Column<ProtocolRow>; 3] = [
    ProtocolRow::ALGORITHM,
    ProtocolRow::CLIENTS,
    ProtocolRow::ROUND,
];

/// **Public** - build the protocol observation table.
///
/// Walks every family directory matching the `root` prefix, decodes each
/// leaf into an experiment key, loads both measurement batches, and emits
/// one row per normalized observation. Any leaf that fails to decode or
/// load aborts the whole build.
///
/// # Arguments
/// * `root` - Family prefix, e.g. `target/criterion/Protocol`
///
/// # Errors
/// Returns `DatasetError` on traversal failures, malformed paths, or
/// malformed sample files.
pub fn build_protocol_dataset(root: &Path) -> Result<Vec<ProtocolRow>, DatasetError> {
    info!("Building protocol dataset from {}", root.display());
    let mut rows = Vec::new();
    for family in family_dirs(root)? {
        for leaf in leaf_dirs(&family)? {
            let key = decode_protocol_leaf(&leaf)?;
            let times = load_leaf_observations(&leaf)?;
            debug!("{}: {} observations", leaf.display(), times.len());
            append_rows(&mut rows, &key, &times, &leaf)?;
        }
    }
    info!("Protocol dataset has {} rows", rows.len());
    Ok(rows)
}

fn append_rows(
    rows: &mut Vec<ProtocolRow>,
    key: &ExperimentKey,
    times: &[f64],
    leaf: &Path,
) -> Result<(), DatasetError> {
    let (clients, round) = match key {
        ExperimentKey::PostQuantumProtocol { clients, round, .. }
        | ExperimentKey::ClassicProtocol { clients, round } => (*clients, *round),
        _ => {
            return Err(DecodeError::MalformedPath(format!(
                "{}: not a protocol configuration",
                leaf.display()
            ))
            .into())
        }
    };
    let algorithm = key.algorithm();
    let kind = key.kind();
    rows.extend(times.iter().map(|&time| ProtocolRow {
        algorithm: algorithm.clone(),
        clients,
        round,
        time,
        kind,
    }));
    Ok(())
}
