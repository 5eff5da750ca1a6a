//! Pairwise change extraction
//!
//! Turns one differ report into the typed, sorted change list of a single
//! transition.

use crate::differ::{DirectoryDiffer, LineCount, RawDiffEntry};
use crate::error::DiffError;
use crate::snapshot::path::{compare_filenames, normalize_root_string, root_prefix};
use crate::types::{ChangeKind, FileChange, NamedFileChange};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extracts the changes between two directories through a differ
pub struct ChangeExtractor<D> {
    differ: D,
}

impl<D: DirectoryDiffer> ChangeExtractor<D> {
    pub fn new(differ: D) -> Self {
        Self { differ }
    }

    /// Changes from `dir_a` to `dir_b`, sorted by filename
    pub async fn extract_changes(
        &self,
        dir_a: &Path,
        dir_b: &Path,
    ) -> Result<Vec<NamedFileChange>, DiffError> {
        let root_a = normalize_root_string(dir_a);
        let root_b = normalize_root_string(dir_b);

        let report = self
            .differ
            .diff(&PathBuf::from(&root_a), &PathBuf::from(&root_b))
            .await?;

        let changes = classify_report(report, &root_prefix(&root_a), &root_prefix(&root_b))?;
        debug!(
            differ = self.differ.name(),
            before = %root_a,
            after = %root_b,
            changes = changes.len(),
            "Extracted transition"
        );
        Ok(changes)
    }
}

/// Classify and sort every entry of a report
///
/// A filename reported twice is an error: consolidation relies on one entry
/// per file per transition.
pub fn classify_report(
    report: Vec<RawDiffEntry>,
    prefix_a: &str,
    prefix_b: &str,
) -> Result<Vec<NamedFileChange>, DiffError> {
    let mut changes = report
        .into_iter()
        .map(|entry| classify_entry(entry, prefix_a, prefix_b))
        .collect::<Result<Vec<_>, _>>()?;

    changes.sort_by(|a, b| compare_filenames(&a.filename, &b.filename));

    if let Some(pair) = changes.windows(2).find(|w| w[0].filename == w[1].filename) {
        return Err(DiffError::malformed(
            pair[1].filename.clone(),
            "file reported more than once in one transition",
        ));
    }

    Ok(changes)
}

/// Classify a single report entry
pub fn classify_entry(
    entry: RawDiffEntry,
    prefix_a: &str,
    prefix_b: &str,
) -> Result<NamedFileChange, DiffError> {
    let (kind, full_path, prefix) = match (&entry.before, &entry.after) {
        (None, Some(after)) => (ChangeKind::Creation, after, prefix_b),
        (Some(before), None) => (ChangeKind::Deletion, before, prefix_a),
        (Some(before), Some(_)) => (ChangeKind::Modification, before, prefix_a),
        (None, None) => {
            return Err(DiffError::malformed(
                entry.source.clone(),
                "both sides are the null device",
            ))
        }
    };

    let filename = full_path
        .strip_prefix(prefix)
        .filter(|rest| !rest.is_empty())
        .ok_or_else(|| {
            DiffError::malformed(
                entry.source.clone(),
                format!("path {:?} is not under {:?}", full_path, prefix),
            )
        })?
        .to_string();

    let change = match (entry.additions, entry.deletions) {
        (LineCount::Lines(additions), LineCount::Lines(deletions)) => {
            FileChange::new(kind, additions, deletions)
        }
        _ => FileChange::binary(kind),
    };

    Ok(NamedFileChange::new(filename, change))
}
