//! dirtrail: Consolidated Structural Diff Across Directory Snapshots
//!
//! Diffs each consecutive pair of an ordered list of directory snapshots and
//! aligns the per-pair results into one table: a row per file, a column per
//! transition.

pub mod cli;
pub mod config;
pub mod consolidate;
pub mod differ;
pub mod error;
pub mod extract;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod snapshot;
pub mod types;

pub use consolidate::{consolidate, FileHistory};
pub use differ::{DirectoryDiffer, GitNumstatDiffer, WalkDiffer};
pub use error::{ApiError, DiffError};
pub use extract::ChangeExtractor;
pub use pipeline::{consolidate_across_directories, ConsolidationOptions};
pub use types::{ChangeKind, ConsolidatedRow, ConsolidatedTable, FileChange, NamedFileChange, Slot};
