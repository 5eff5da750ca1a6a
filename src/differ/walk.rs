//! In-process differ that walks both trees
//!
//! Line counts are multiset differences: an added line is a line of the new
//! version with no unmatched equal line in the old one. This agrees with
//! `git diff --numstat` for appends, removals, in-place edits and a gained or
//! lost final newline, and may report fewer lines when identical lines move
//! around.

use super::{DiffReport, DirectoryDiffer, LineCount, RawDiffEntry};
use crate::error::DiffError;
use crate::snapshot::path::{join_reported, normalize_root_string};
use crate::snapshot::walker::{ensure_directory, SnapshotFile, Walker, WalkerConfig};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Differ that compares snapshot contents without external tools
#[derive(Debug, Clone, Default)]
pub struct WalkDiffer {
    ignore_names: Vec<String>,
}

impl WalkDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip any path component equal to one of `names`
    pub fn with_ignore_names(names: Vec<String>) -> Self {
        Self {
            ignore_names: names,
        }
    }

    fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: false,
            ignore_names: self.ignore_names.clone(),
        }
    }
}

#[async_trait]
impl DirectoryDiffer for WalkDiffer {
    #[instrument(skip(self), fields(backend = "walk"))]
    async fn diff(&self, before: &Path, after: &Path) -> Result<DiffReport, DiffError> {
        ensure_directory(before, before, after)?;
        ensure_directory(after, before, after)?;

        let before = before.to_path_buf();
        let after = after.to_path_buf();
        let config = self.walker_config();

        let task_before = before.clone();
        let task_after = after.clone();
        let report = tokio::task::spawn_blocking(move || {
            compare_trees(&task_before, &task_after, config)
        })
        .await
        .map_err(|e| DiffError::extraction(&before, &after, format!("walk task failed: {}", e)))?
        .map_err(|e| DiffError::extraction(&before, &after, e.to_string()))?;

        debug!(entries = report.len(), "tree walk compared");
        Ok(report)
    }

    fn name(&self) -> &str {
        "walk"
    }
}

fn compare_trees(
    before: &Path,
    after: &Path,
    config: WalkerConfig,
) -> Result<DiffReport, std::io::Error> {
    let old_files = index_files(Walker::with_config(before.to_path_buf(), config.clone()).walk()?);
    let new_files = index_files(Walker::with_config(after.to_path_buf(), config).walk()?);

    let before_root = normalize_root_string(before);
    let after_root = normalize_root_string(after);

    let mut relatives: Vec<&String> = old_files.keys().chain(new_files.keys()).collect();
    relatives.sort();
    relatives.dedup();

    let mut report = Vec::new();
    for relative in relatives {
        let old = old_files.get(relative).map(std::fs::read).transpose()?;
        let new = new_files.get(relative).map(std::fs::read).transpose()?;

        let (additions, deletions) = match (&old, &new) {
            (Some(old), Some(new)) if old == new => continue,
            (Some(old), Some(new)) => count_changes(old, new),
            (None, Some(new)) => count_changes(&[], new),
            (Some(old), None) => count_changes(old, &[]),
            (None, None) => continue,
        };

        let before_path = old.as_ref().map(|_| join_reported(&before_root, relative));
        let after_path = new.as_ref().map(|_| join_reported(&after_root, relative));
        let source = format!(
            "{}\t{}",
            before_path.as_deref().unwrap_or(super::NULL_DEVICE),
            after_path.as_deref().unwrap_or(super::NULL_DEVICE)
        );

        report.push(RawDiffEntry {
            additions,
            deletions,
            before: before_path,
            after: after_path,
            source,
        });
    }

    Ok(report)
}

fn index_files(files: Vec<SnapshotFile>) -> BTreeMap<String, PathBuf> {
    files.into_iter().map(|f| (f.relative, f.path)).collect()
}

fn is_binary(content: &[u8]) -> bool {
    content.contains(&0)
}

/// Lines with their terminators, so an unterminated last line differs from
/// the same text followed by a newline
fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    content.split_inclusive(|b| *b == b'\n').collect()
}

/// Count `(additions, deletions)` between two file versions
fn count_changes(old: &[u8], new: &[u8]) -> (LineCount, LineCount) {
    if is_binary(old) || is_binary(new) {
        return (LineCount::Binary, LineCount::Binary);
    }

    let mut remaining: HashMap<&[u8], u64> = HashMap::new();
    for line in split_lines(old) {
        *remaining.entry(line).or_insert(0) += 1;
    }

    let mut additions = 0u64;
    for line in split_lines(new) {
        match remaining.get_mut(line) {
            Some(count) if *count > 0 => *count -= 1,
            _ => additions += 1,
        }
    }
    let deletions = remaining.values().sum();

    (LineCount::Lines(additions), LineCount::Lines(deletions))
}
