//! Directory Differ Abstraction
//!
//! A directory differ compares two directory trees and reports, per changed
//! file, how many lines were added and removed. Extraction and consolidation
//! only see the [`DirectoryDiffer`] trait, so back-ends can be swapped without
//! touching either.

use crate::error::DiffError;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

pub mod git;
pub mod numstat;
pub mod walk;

pub use git::GitNumstatDiffer;
pub use walk::WalkDiffer;

/// Path reported for the side on which a file does not exist
pub const NULL_DEVICE: &str = "/dev/null";

/// Line count reported for one side of a file change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCount {
    Lines(u64),
    /// Content could not be counted in lines
    Binary,
}

/// One changed file as reported by a differ
///
/// `before` / `after` are full paths as the differ printed them; `None`
/// stands for the null-device sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDiffEntry {
    pub additions: LineCount,
    pub deletions: LineCount,
    pub before: Option<String>,
    pub after: Option<String>,
    /// Original report line, kept for error messages
    pub source: String,
}

/// Everything a differ reported for one pair of directories
pub type DiffReport = Vec<RawDiffEntry>;

/// Directory differ trait
#[async_trait]
pub trait DirectoryDiffer: Send + Sync {
    /// Compare two directories; `before` and `after` are passed through as given.
    async fn diff(&self, before: &Path, after: &Path) -> Result<DiffReport, DiffError>;

    /// Back-end name, used in logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<D: DirectoryDiffer + ?Sized> DirectoryDiffer for &D {
    async fn diff(&self, before: &Path, after: &Path) -> Result<DiffReport, DiffError> {
        (**self).diff(before, after).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<D: DirectoryDiffer + ?Sized> DirectoryDiffer for Arc<D> {
    async fn diff(&self, before: &Path, after: &Path) -> Result<DiffReport, DiffError> {
        (**self).diff(before, after).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Selectable differ back-ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifferBackend {
    /// `git diff --numstat --no-index`
    Git,
    /// In-process tree walk
    Walk,
}

impl std::str::FromStr for DifferBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "git" => Ok(DifferBackend::Git),
            "walk" => Ok(DifferBackend::Walk),
            other => Err(format!("Unknown differ backend: {} (expected 'git' or 'walk')", other)),
        }
    }
}

/// Build the differ selected by configuration
pub fn build_differ(config: &crate::config::DifferConfig) -> Arc<dyn DirectoryDiffer> {
    match config.backend {
        DifferBackend::Git => Arc::new(GitNumstatDiffer::with_binary(config.git_binary.clone())),
        DifferBackend::Walk => Arc::new(WalkDiffer::with_ignore_names(config.ignore.clone())),
    }
}
