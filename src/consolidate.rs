//! Change consolidation
//!
//! Aligns independent per-transition change lists into one table: one row per
//! filename, one slot per transition. Whether a missing entry means "untouched"
//! or "not there" is decided by [`FileHistory`], a small per-file state machine.

use crate::snapshot::path::compare_filenames;
use crate::types::{ChangeKind, ConsolidatedRow, FileChange, NamedFileChange, Slot};
use std::collections::{BTreeSet, HashMap};

/// What is known about a file after scanning some prefix of the transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileHistory {
    /// No transition has mentioned the file yet.
    #[default]
    Unseen,
    /// The file exists after the last scanned transition.
    Exists,
    /// The file was deleted and has not come back.
    Gone,
}

impl FileHistory {
    /// Advance over one transition, returning the next state and the slot to emit
    pub fn step(self, entry: Option<&FileChange>) -> (FileHistory, Slot) {
        match entry {
            Some(change) => {
                let next = match change.kind {
                    ChangeKind::Creation | ChangeKind::Modification | ChangeKind::NoOp => {
                        FileHistory::Exists
                    }
                    ChangeKind::Deletion => FileHistory::Gone,
                };
                (next, Slot::Changed(*change))
            }
            None => match self {
                FileHistory::Exists => (FileHistory::Exists, Slot::Unchanged),
                FileHistory::Unseen | FileHistory::Gone => (self, Slot::Absent),
            },
        }
    }
}

/// Consolidate ordered per-transition change lists into rows sorted by filename
pub fn consolidate(transitions: &[Vec<NamedFileChange>]) -> Vec<ConsolidatedRow> {
    let lookups: Vec<HashMap<&str, &FileChange>> = transitions
        .iter()
        .map(|changes| {
            changes
                .iter()
                .map(|named| (named.filename.as_str(), &named.change))
                .collect()
        })
        .collect();

    let mut filenames: Vec<&str> = transitions
        .iter()
        .flatten()
        .map(|named| named.filename.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    filenames.sort_by(|a, b| compare_filenames(a, b));

    let mut rows: Vec<ConsolidatedRow> = filenames
        .into_iter()
        .map(|filename| consolidate_file(filename, &lookups))
        .collect();

    rows.sort_by(|a, b| compare_filenames(&a.filename, &b.filename));
    rows
}

fn consolidate_file(filename: &str, lookups: &[HashMap<&str, &FileChange>]) -> ConsolidatedRow {
    let mut state = FileHistory::Unseen;
    let changes = lookups
        .iter()
        .map(|lookup| {
            let (next, slot) = state.step(lookup.get(filename).copied());
            state = next;
            slot
        })
        .collect();

    ConsolidatedRow {
        filename: filename.to_string(),
        changes,
    }
}
