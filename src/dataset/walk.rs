//! Benchmark tree traversal.
//!
//! Family roots are given as directory-name prefixes: `criterion/Protocol`
//! selects `criterion/Protocol_PQ` and `criterion/Protocol_Classic`. Leaf
//! configuration directories sit exactly two levels below each family
//! directory and hold the `base`/`new` batches.

use crate::utils::error::{DatasetError, DecodeError};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand a family prefix into the matching benchmark family directories.
///
/// The prefix's final component is matched against the names of sibling
/// directories; non-directories are skipped. Matches come back sorted by
/// name. A prefix matching nothing is not an error, only a warning, so a
/// run without e.g. classical results still produces the other datasets.
pub fn family_dirs(prefix: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    let name = prefix
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            DecodeError::MalformedPath(format!(
                "{}: family prefix has no usable final component",
                prefix.display()
            ))
        })?;
    let parent = match prefix.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut dirs = Vec::new();
    for entry in WalkDir::new(parent)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .map(|dir_name| dir_name.starts_with(name))
            .unwrap_or(false);
        if matches {
            dirs.push(entry.into_path());
        }
    }

    if dirs.is_empty() {
        warn!("No benchmark directories match prefix {}", prefix.display());
    } else {
        debug!("Prefix {} matched {} directories", prefix.display(), dirs.len());
    }
    Ok(dirs)
}

/// Enumerate the leaf configuration directories of one family directory.
///
/// Leaves live exactly two levels down (`<family>/<group>/<leaf>`). A file
/// at leaf depth means the tree does not follow the harness layout, and the
/// whole build fails rather than guessing. Files directly under the family
/// directory are outside the leaf pattern and are ignored.
pub fn leaf_dirs(family: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    let mut leaves = Vec::new();
    for entry in WalkDir::new(family)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            return Err(DatasetError::UnexpectedEntry(entry.into_path()));
        }
        leaves.push(entry.into_path());
    }
    Ok(leaves)
}
