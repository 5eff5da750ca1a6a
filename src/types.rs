//! Core data model shared by extraction, consolidation and rendering.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// What happened to a file within one transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Creation,
    Deletion,
    Modification,
    /// Synthesized by consolidation; extraction never produces it.
    NoOp,
}

impl ChangeKind {
    /// Stable lowercase tag, used by serializers and CSS classes.
    pub fn tag(self) -> &'static str {
        match self {
            ChangeKind::Creation => "creation",
            ChangeKind::Deletion => "deletion",
            ChangeKind::Modification => "modification",
            ChangeKind::NoOp => "none",
        }
    }
}

/// One file's status within a single directory-pair transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileChange {
    pub kind: ChangeKind,
    pub additions: u64,
    pub deletions: u64,
    /// Set when the differ could not count lines (binary content); counts are zero.
    pub binary: bool,
}

impl FileChange {
    pub fn new(kind: ChangeKind, additions: u64, deletions: u64) -> Self {
        Self {
            kind,
            additions,
            deletions,
            binary: false,
        }
    }

    pub fn binary(kind: ChangeKind) -> Self {
        Self {
            kind,
            additions: 0,
            deletions: 0,
            binary: true,
        }
    }
}

/// A file change tagged with its path relative to the transition's roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFileChange {
    pub filename: String,
    pub change: FileChange,
}

impl NamedFileChange {
    pub fn new(filename: impl Into<String>, change: FileChange) -> Self {
        Self {
            filename: filename.into(),
            change,
        }
    }
}

/// One transition's cell in a consolidated row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The transition reported a change for this file.
    Changed(FileChange),
    /// The file exists and was left untouched.
    Unchanged,
    /// The file does not exist on either side of the transition.
    Absent,
}

impl Slot {
    /// Kind shown for this slot; `None` for absent slots.
    pub fn kind(&self) -> Option<ChangeKind> {
        match self {
            Slot::Changed(change) => Some(change.kind),
            Slot::Unchanged => Some(ChangeKind::NoOp),
            Slot::Absent => None,
        }
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Absent => serializer.serialize_none(),
            Slot::Unchanged => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("kind", ChangeKind::NoOp.tag())?;
                map.end()
            }
            Slot::Changed(change) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("kind", change.kind.tag())?;
                map.serialize_entry("additions", &change.additions)?;
                map.serialize_entry("deletions", &change.deletions)?;
                map.serialize_entry("binary", &change.binary)?;
                map.end()
            }
        }
    }
}

/// A filename aligned across every transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidatedRow {
    pub filename: String,
    pub changes: Vec<Slot>,
}

/// The consolidated output of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidatedTable {
    /// Column labels, one per transition.
    pub transitions: Vec<String>,
    pub rows: Vec<ConsolidatedRow>,
}

impl ConsolidatedTable {
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
