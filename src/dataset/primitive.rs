//! Primitive operation observation dataset.

use crate::aggregator::{Column, ValueColumn};
use crate::dataset::walk::{family_dirs, leaf_dirs};
use crate::parser::experiment::{decode_primitive_leaf, ExperimentKey, Kind, PrimitiveType};
use crate::parser::sample::load_leaf_observations;
use crate::utils::error::{DatasetError, DecodeError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One primitive operation timing observation.
///
/// Field order is the column order of the `data_primitives.csv` contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrimitiveRow {
    pub algorithm: String,
    #[serde(rename = "Type")]
    pub primitive: PrimitiveType,
    pub operation: String,
    pub time: f64,
    pub kind: Kind,
}

impl PrimitiveRow {
    pub const ALGORITHM: Column<Self> = Column {
        name: "Algorithm",
        get: Self::algorithm_field,
    };
    pub const TYPE: Column<Self> = Column {
        name: "Type",
        get: Self::type_field,
    };
    pub const OPERATION: Column<Self> = Column {
        name: "Operation",
        get: Self::operation_field,
    };
    pub const TIME: ValueColumn<Self> = ValueColumn {
        name: "Time",
        get: Self::time_field,
    };

    fn algorithm_field(row: &Self) -> String {
        row.algorithm.clone()
    }

    fn type_field(row: &Self) -> String {
        row.primitive.to_string()
    }

    fn operation_field(row: &Self) -> String {
        row.operation.clone()
    }

    fn time_field(row: &Self) -> f64 {
        row.time
    }
}

/// Grouping used for `statistics_primitives.csv`.
pub const PRIMITIVE_STAT_GROUPING: [Column<PrimitiveRow>; 3] = [
    PrimitiveRow::ALGORITHM,
    PrimitiveRow::TYPE,
    PrimitiveRow::OPERATION,
];

/// **Public** - build the primitive observation table.
///
/// Accepts several family prefixes (the default run covers `PKE` and
/// `SIG`) and concatenates their observations in the order given. Any
/// leaf that fails to decode or load aborts the whole build.
///
/// # Errors
/// Returns `DatasetError` on traversal failures, malformed paths, or
/// malformed sample files.
pub fn build_primitive_dataset(roots: &[PathBuf]) -> Result<Vec<PrimitiveRow>, DatasetError> {
    let mut rows = Vec::new();
    for root in roots {
        info!("Building primitive dataset from {}", root.display());
        for family in family_dirs(root)? {
            for leaf in leaf_dirs(&family)? {
                let key = decode_primitive_leaf(&leaf)?;
                let times = load_leaf_observations(&leaf)?;
                debug!("{}: {} observations", leaf.display(), times.len());
                append_rows(&mut rows, &key, &times, &leaf)?;
            }
        }
    }
    info!("Primitive dataset has {} rows", rows.len());
    Ok(rows)
}

fn append_rows(
    rows: &mut Vec<PrimitiveRow>,
    key: &ExperimentKey,
    times: &[f64],
    leaf: &Path,
) -> Result<(), DatasetError> {
    let (primitive, operation) = match key {
        ExperimentKey::PostQuantumPrimitive {
            primitive,
            operation,
            ..
        }
        | ExperimentKey::ClassicPrimitive {
            primitive,
            operation,
        } => (*primitive, operation.clone()),
        _ => {
            return Err(DecodeError::MalformedPath(format!(
                "{}: not a primitive configuration",
                leaf.display()
            ))
            .into())
        }
    };
    let algorithm = key.algorithm();
    let kind = key.kind();
    rows.extend(times.iter().map(|&time| PrimitiveRow {
        algorithm: algorithm.clone(),
        primitive,
        operation: operation.clone(),
        time,
        kind,
    }));
    Ok(())
}
