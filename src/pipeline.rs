//! Multi-directory consolidation pipeline
//!
//! Runs extraction over every consecutive pair of snapshots (optionally
//! starting from a synthetic empty directory) and consolidates the results.

use crate::consolidate::consolidate;
use crate::differ::DirectoryDiffer;
use crate::error::DiffError;
use crate::extract::ChangeExtractor;
use crate::snapshot::path::{canonicalize_root, root_label};
use crate::types::{ConsolidatedTable, NamedFileChange};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, instrument, warn};

/// Label used for the synthetic empty snapshot
pub const EMPTY_SNAPSHOT_LABEL: &str = "∅";

/// Pipeline options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationOptions {
    /// Attribute files present in the first snapshot as creations
    #[serde(default = "default_true")]
    pub prepend_synthetic_empty: bool,

    /// Extract independent transitions concurrently
    #[serde(default)]
    pub parallel: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ConsolidationOptions {
    fn default() -> Self {
        Self {
            prepend_synthetic_empty: true,
            parallel: false,
        }
    }
}

/// Compute the consolidated table for an ordered list of snapshots
#[instrument(skip(differ, directories), fields(differ = differ.name(), directories = directories.len()))]
pub async fn consolidate_across_directories<D: DirectoryDiffer>(
    differ: D,
    directories: &[PathBuf],
    options: ConsolidationOptions,
) -> Result<ConsolidatedTable, DiffError> {
    if directories.is_empty() {
        return Err(DiffError::InvalidInput(
            "at least one directory is required".to_string(),
        ));
    }

    let roots = directories
        .iter()
        .map(|dir| {
            canonicalize_root(dir)
                .map_err(|e| DiffError::extraction(dir, dir, format!("cannot resolve: {}", e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let extractor = ChangeExtractor::new(differ);
    let mut transitions: Vec<Vec<NamedFileChange>> = Vec::with_capacity(roots.len());
    let mut labels = Vec::with_capacity(roots.len());

    if options.prepend_synthetic_empty {
        transitions.push(extract_from_empty(&extractor, &roots[0]).await?);
        labels.push(format!("{} → {}", EMPTY_SNAPSHOT_LABEL, root_label(&roots[0])));
    }

    let pairs: Vec<(&Path, &Path)> = roots
        .windows(2)
        .map(|pair| (pair[0].as_path(), pair[1].as_path()))
        .collect();

    if options.parallel {
        let extracted = try_join_all(
            pairs
                .iter()
                .map(|(before, after)| extractor.extract_changes(before, after)),
        )
        .await?;
        transitions.extend(extracted);
    } else {
        for (before, after) in &pairs {
            transitions.push(extractor.extract_changes(before, after).await?);
        }
    }
    labels.extend(
        pairs
            .iter()
            .map(|(before, after)| format!("{} → {}", root_label(before), root_label(after))),
    );

    let rows = consolidate(&transitions);
    info!(
        transitions = transitions.len(),
        rows = rows.len(),
        "Consolidated directory changes"
    );

    Ok(ConsolidatedTable {
        transitions: labels,
        rows,
    })
}

/// Extract the transition from a fresh empty directory to `first`
///
/// The empty directory is removed on every path. A removal failure is only
/// returned when extraction itself succeeded.
async fn extract_from_empty<D: DirectoryDiffer>(
    extractor: &ChangeExtractor<D>,
    first: &Path,
) -> Result<Vec<NamedFileChange>, DiffError> {
    let empty = TempDir::new()?;
    let empty_path = canonicalize_root(empty.path()).unwrap_or_else(|_| empty.path().to_path_buf());

    let result = extractor.extract_changes(&empty_path, first).await;
    let cleanup = empty.close();
    settle_cleanup(result, cleanup, empty_path)
}

/// Combine an extraction result with the removal of its scratch directory
///
/// The extraction error wins when both fail; the removal failure is logged.
fn settle_cleanup<T>(
    result: Result<T, DiffError>,
    cleanup: std::io::Result<()>,
    path: PathBuf,
) -> Result<T, DiffError> {
    match (result, cleanup) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(source)) => Err(DiffError::CleanupFailed { path, source }),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(cleanup_err)) => {
            warn!(
                path = %path.display(),
                error = %cleanup_err,
                "Failed to remove synthetic empty directory"
            );
            Err(e)
        }
    }
}
