//! Experiment identity decoding.
//!
//! The benchmark harness encodes everything about an experiment in its
//! directory and file names. Protocol runs live at
//! `Protocol_PQ/<round>/<pke>-<sig>-...-<clients>` (classical runs collapse
//! the leaf to just `<clients>`), primitive runs at
//! `{PKE,SIG}_{PQ,Classic}/<operation>/<algorithm>`, and bandwidth tables
//! are flat files named `{kind}-{pke}-{sig}-{clients}.csv`. This module
//! turns those names into structured [`ExperimentKey`] values and is the
//! only place that knows the naming convention.

use crate::utils::config::{CLASSIC_PKE, CLASSIC_PKE_SIG, CLASSIC_SIG};
use crate::utils::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Whether an experiment exercises the post-quantum or the classical suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "PQ")]
    PostQuantum,
    #[serde(rename = "CLASSIC")]
    Classic,
}

impl Kind {
    /// Decode a kind token as it appears in bandwidth file names and
    /// family directory suffixes. Matching is case-insensitive.
    pub fn from_token(token: &str) -> Result<Self, DecodeError> {
        match token.to_ascii_uppercase().as_str() {
            "PQ" => Ok(Kind::PostQuantum),
            "CLASSIC" => Ok(Kind::Classic),
            _ => Err(DecodeError::UnknownExperimentKind(token.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::PostQuantum => "PQ",
            Kind::Classic => "CLASSIC",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A protocol phase as named by the harness's round directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Round {
    Registration,
    #[serde(rename = "Round 1")]
    Round1,
    #[serde(rename = "Round 2")]
    Round2,
    #[serde(rename = "Round 3")]
    Round3,
    #[serde(rename = "Round 4")]
    Round4,
    #[serde(rename = "Round 5")]
    Round5,
    #[serde(rename = "Round 6")]
    Round6,
}

impl Round {
    /// Every round the protocol defines, in protocol order.
    pub const ALL: [Round; 7] = [
        Round::Registration,
        Round::Round1,
        Round::Round2,
        Round::Round3,
        Round::Round4,
        Round::Round5,
        Round::Round6,
    ];

    /// Decode a round directory name. Returns `None` for anything that is
    /// not one of the seven fixed phase names (exact match, including case).
    pub fn parse(name: &str) -> Option<Round> {
        match name {
            "Registration" => Some(Round::Registration),
            "Round 1" => Some(Round::Round1),
            "Round 2" => Some(Round::Round2),
            "Round 3" => Some(Round::Round3),
            "Round 4" => Some(Round::Round4),
            "Round 5" => Some(Round::Round5),
            "Round 6" => Some(Round::Round6),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Round::Registration => "Registration",
            Round::Round1 => "Round 1",
            Round::Round2 => "Round 2",
            Round::Round3 => "Round 3",
            Round::Round4 => "Round 4",
            Round::Round5 => "Round 5",
            Round::Round6 => "Round 6",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which cryptographic primitive family a benchmark exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    #[serde(rename = "PKE")]
    Pke,
    #[serde(rename = "SIG")]
    Sig,
}

impl PrimitiveType {
    pub fn parse(token: &str) -> Option<PrimitiveType> {
        match token {
            "PKE" => Some(PrimitiveType::Pke),
            "SIG" => Some(PrimitiveType::Sig),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::Pke => "PKE",
            PrimitiveType::Sig => "SIG",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured identity of one benchmarked experiment.
///
/// Classical variants carry no algorithm because the harness only runs a
/// single classical configuration; [`ExperimentKey::algorithm`] substitutes
/// the fixed baseline labels when a dataset row needs a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExperimentKey {
    PostQuantumProtocol {
        algorithm: String,
        clients: u64,
        round: Round,
    },
    ClassicProtocol {
        clients: u64,
        round: Round,
    },
    PostQuantumPrimitive {
        algorithm: String,
        primitive: PrimitiveType,
        operation: String,
    },
    ClassicPrimitive {
        primitive: PrimitiveType,
        operation: String,
    },
}

impl ExperimentKey {
    pub fn kind(&self) -> Kind {
        match self {
            ExperimentKey::PostQuantumProtocol { .. } | ExperimentKey::PostQuantumPrimitive { .. } => {
                Kind::PostQuantum
            }
            ExperimentKey::ClassicProtocol { .. } | ExperimentKey::ClassicPrimitive { .. } => {
                Kind::Classic
            }
        }
    }

    /// The algorithm label a dataset row carries for this experiment.
    ///
    /// Post-quantum keys return their decoded algorithm; classical keys
    /// return the fixed baseline label for their scope (the PKE+SIG pair
    /// for protocol runs, the single primitive otherwise).
    pub fn algorithm(&self) -> String {
        match self {
            ExperimentKey::PostQuantumProtocol { algorithm, .. }
            | ExperimentKey::PostQuantumPrimitive { algorithm, .. } => algorithm.clone(),
            ExperimentKey::ClassicProtocol { .. } => CLASSIC_PKE_SIG.to_string(),
            ExperimentKey::ClassicPrimitive { primitive, .. } => match primitive {
                PrimitiveType::Pke => CLASSIC_PKE.to_string(),
                PrimitiveType::Sig => CLASSIC_SIG.to_string(),
            },
        }
    }
}

/// Identity decoded from a bandwidth table file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandwidthKey {
    pub kind: Kind,
    pub algorithm: String,
    pub clients: u64,
}

/// **Public** - decode a protocol leaf directory into an experiment key.
///
/// The leaf's parent names the round; the leaf itself is either a
/// hyphenated post-quantum configuration (`<pke>-<sig>[-...]-<clients>`,
/// algorithm taken from the first two fields, client count from the last)
/// or a bare client count for the classical baseline.
///
/// # Arguments
/// * `leaf` - Path of the leaf configuration directory
///
/// # Errors
/// Returns `DecodeError::MalformedPath` when the round name is not one of
/// the seven known phases or the client count field is not a positive
/// integer.
pub fn decode_protocol_leaf(leaf: &Path) -> Result<ExperimentKey, DecodeError> {
    let name = path_segment(leaf, 0)?;
    let round_name = path_segment(leaf, 1)?;
    let round = Round::parse(round_name).ok_or_else(|| {
        DecodeError::MalformedPath(format!(
            "{}: unknown round name {:?}",
            leaf.display(),
            round_name
        ))
    })?;

    let parts: Vec<&str> = name.split('-').collect();
    if parts.len() >= 2 {
        let algorithm = format!("{}+{}", capitalize(parts[0]), capitalize(parts[1]));
        let clients = parse_clients(parts[parts.len() - 1], leaf)?;
        Ok(ExperimentKey::PostQuantumProtocol {
            algorithm,
            clients,
            round,
        })
    } else {
        let clients = parse_clients(name, leaf)?;
        Ok(ExperimentKey::ClassicProtocol { clients, round })
    }
}

/// **Public** - decode a primitive leaf directory into an experiment key.
///
/// The grandparent is the family directory `{type}_{kind}` (e.g. `PKE_PQ`),
/// the parent names the operation, and the leaf names the algorithm. For
/// classical families the leaf name is ignored in favour of the fixed
/// baseline label.
///
/// # Errors
/// Returns `DecodeError::MalformedPath` when the family directory does not
/// split into a known primitive type and a trailing token, and
/// `DecodeError::UnknownExperimentKind` when that token is neither `PQ`
/// nor `Classic`.
pub fn decode_primitive_leaf(leaf: &Path) -> Result<ExperimentKey, DecodeError> {
    let family = path_segment(leaf, 2)?;
    let operation = path_segment(leaf, 1)?.to_string();

    let parts: Vec<&str> = family.split('_').collect();
    if parts.len() < 2 {
        return Err(DecodeError::MalformedPath(format!(
            "{}: family directory {:?} does not match {{type}}_{{kind}}",
            leaf.display(),
            family
        )));
    }
    let primitive = PrimitiveType::parse(parts[0]).ok_or_else(|| {
        DecodeError::MalformedPath(format!(
            "{}: unknown primitive type {:?}",
            leaf.display(),
            parts[0]
        ))
    })?;

    match Kind::from_token(parts[1])? {
        Kind::PostQuantum => {
            let algorithm = capitalize(path_segment(leaf, 0)?);
            Ok(ExperimentKey::PostQuantumPrimitive {
                algorithm,
                primitive,
                operation,
            })
        }
        Kind::Classic => Ok(ExperimentKey::ClassicPrimitive {
            primitive,
            operation,
        }),
    }
}

/// **Public** - decode a bandwidth table file stem.
///
/// Stems follow `{kind}-{pke}-{sig}-{clients}`; classical tables keep the
/// four-field shape with placeholder algorithm fields, which are discarded
/// in favour of the fixed baseline label.
///
/// # Errors
/// Returns `DecodeError::MalformedPath` for a stem without exactly four
/// fields or a bad client count, and `DecodeError::UnknownExperimentKind`
/// for an unrecognized kind token.
pub fn decode_bandwidth_name(stem: &str) -> Result<BandwidthKey, DecodeError> {
    let parts: Vec<&str> = stem.split('-').collect();
    if parts.len() != 4 {
        return Err(DecodeError::MalformedPath(format!(
            "bandwidth file stem {:?} does not have four `-` separated fields",
            stem
        )));
    }
    let kind = Kind::from_token(parts[0])?;
    let clients = parse_clients(parts[3], Path::new(stem))?;
    let algorithm = match kind {
        Kind::PostQuantum => format!("{}+{}", capitalize(parts[1]), capitalize(parts[2])),
        Kind::Classic => CLASSIC_PKE_SIG.to_string(),
    };
    Ok(BandwidthKey {
        kind,
        algorithm,
        clients,
    })
}

/// Canonicalize one algorithm name component by uppercasing its first
/// ASCII letter, so `kyber768` and `Kyber768` name the same algorithm.
fn capitalize(component: &str) -> String {
    let mut chars = component.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Return the path component `levels_up` levels above the final one.
fn path_segment(path: &Path, levels_up: usize) -> Result<&str, DecodeError> {
    let mut current = path;
    for _ in 0..levels_up {
        current = current.parent().ok_or_else(|| {
            DecodeError::MalformedPath(format!("{}: too few path components", path.display()))
        })?;
    }
    current
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            DecodeError::MalformedPath(format!(
                "{}: path component is missing or not valid UTF-8",
                path.display()
            ))
        })
}

fn parse_clients(field: &str, context: &Path) -> Result<u64, DecodeError> {
    match field.parse::<u64>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(DecodeError::MalformedPath(format!(
            "{}: client count field {:?} is not a positive integer",
            context.display(),
            field
        ))),
    }
}
