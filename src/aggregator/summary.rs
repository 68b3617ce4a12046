//! Grouped summary statistics over observation tables.
//!
//! The aggregator works like a dataframe group-by: callers name an ordered
//! list of grouping columns and one value column, and every distinct key
//! combination yields a single summary row (mean, sample standard
//! deviation, observation count). Keys accumulate in a `BTreeMap`, so two
//! runs over the same rows produce identical tables whatever order the
//! rows arrived in.

use crate::aggregator::stats::{mean, round_to, sample_std};
use crate::utils::config::STAT_PRECISION;
use log::debug;
use std::collections::BTreeMap;

/// A named grouping column for row type `R`.
///
/// Extractors render the key as text, which is also exactly what the CSV
/// contract carries, so grouping and serialization cannot drift apart.
pub struct Column<R> {
    pub name: &'static str,
    pub get: fn(&R) -> String,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Column<R> {}

/// A named value column for row type `R`.
pub struct ValueColumn<R> {
    pub name: &'static str,
    pub get: fn(&R) -> f64,
}

impl<R> Clone for ValueColumn<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ValueColumn<R> {}

/// One aggregated group: key values in grouping-column order plus the
/// summary statistics, rounded to [`STAT_PRECISION`] decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub key: Vec<String>,
    pub mean: f64,
    pub std: Option<f64>,
    pub count: u64,
}

/// An aggregated table: header plus one [`StatRow`] per distinct key,
/// sorted by key.
///
/// The header is the grouping column names followed by `{value}_mean`,
/// `{value}_std` and `Samples`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTable {
    pub columns: Vec<String>,
    pub rows: Vec<StatRow>,
}

/// **Public** - group rows by the given columns and summarize the value
/// column per group.
///
/// # Arguments
/// * `rows` - Observation rows to aggregate
/// * `group` - Ordered, non-empty list of grouping columns
/// * `value` - Value column to summarize
///
/// # Returns
/// A [`StatTable`] with one row per distinct key combination that actually
/// occurs; empty input yields a table with the full header and no rows.
pub fn summarize<R>(rows: &[R], group: &[Column<R>], value: ValueColumn<R>) -> StatTable {
    debug_assert!(!group.is_empty(), "grouping column list must be non-empty");

    let mut groups: BTreeMap<Vec<String>, Vec<f64>> = BTreeMap::new();
    for row in rows {
        let key: Vec<String> = group.iter().map(|column| (column.get)(row)).collect();
        groups.entry(key).or_default().push((value.get)(row));
    }
    debug!("Aggregated {} rows into {} groups", rows.len(), groups.len());

    let columns = group
        .iter()
        .map(|column| column.name.to_string())
        .chain([
            format!("{}_mean", value.name),
            format!("{}_std", value.name),
            "Samples".to_string(),
        ])
        .collect();
    let rows = groups
        .into_iter()
        .map(|(key, values)| StatRow {
            key,
            mean: round_to(mean(&values), STAT_PRECISION),
            std: sample_std(&values).map(|std| round_to(std, STAT_PRECISION)),
            count: values.len() as u64,
        })
        .collect();
    StatTable { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone)]
    struct Obs {
        name: &'static str,
        clients: u64,
        time: f64,
    }

    const NAME: Column<Obs> = Column {
        name: "Algorithm",
        get: |obs| obs.name.to_string(),
    };
    const CLIENTS: Column<Obs> = Column {
        name: "Clients",
        get: |obs| obs.clients.to_string(),
    };
    const TIME: ValueColumn<Obs> = ValueColumn {
        name: "Time",
        get: |obs| obs.time,
    };

    fn sample_rows() -> Vec<Obs> {
        vec![
            Obs { name: "A", clients: 1, time: 10.0 },
            Obs { name: "A", clients: 1, time: 20.0 },
            Obs { name: "A", clients: 2, time: 5.0 },
        ]
    }

    #[test]
    fn test_summarize_groups_and_rounds() {
        let table = summarize(&sample_rows(), &[NAME, CLIENTS], TIME);

        assert_eq!(
            table.columns,
            vec!["Algorithm", "Clients", "Time_mean", "Time_std", "Samples"]
        );
        assert_eq!(
            table.rows,
            vec![
                StatRow {
                    key: vec!["A".to_string(), "1".to_string()],
                    mean: 15.0,
                    std: Some(7.071),
                    count: 2,
                },
                StatRow {
                    key: vec!["A".to_string(), "2".to_string()],
                    mean: 5.0,
                    std: None,
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_summarize_is_input_order_independent() {
        let mut reversed = sample_rows();
        reversed.reverse();
        assert_eq!(
            summarize(&sample_rows(), &[NAME, CLIENTS], TIME),
            summarize(&reversed, &[NAME, CLIENTS], TIME)
        );
    }

    #[test]
    fn test_summarize_empty_input_keeps_header() {
        let table = summarize(&[], &[NAME], TIME);
        assert_eq!(table.columns, vec!["Algorithm", "Time_mean", "Time_std", "Samples"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_summarize_single_grouping_column() {
        let table = summarize(&sample_rows(), &[NAME], TIME);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].count, 3);
        // (10 + 20 + 5) / 3 = 11.666...
        assert_eq!(table.rows[0].mean, 11.667);
    }
}
