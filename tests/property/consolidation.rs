//! Shape and state invariants of the consolidated table

use dirtrail::{consolidate, ChangeKind, FileChange, NamedFileChange, Slot};
use proptest::prelude::*;
use std::collections::HashSet;

const NAMES: &[&str] = &["a.txt", "B.txt", "b.txt", "src/main.rs", "src/Util.rs", "docs/x.md"];

fn kind_strategy() -> impl Strategy<Value = ChangeKind> {
    prop_oneof![
        Just(ChangeKind::Creation),
        Just(ChangeKind::Deletion),
        Just(ChangeKind::Modification),
    ]
}

/// One transition: a subset of NAMES, each with a change
fn transition_strategy() -> impl Strategy<Value = Vec<NamedFileChange>> {
    prop::collection::btree_map(0..NAMES.len(), (kind_strategy(), 0u64..50, 0u64..50), 0..NAMES.len())
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(i, (kind, a, d))| NamedFileChange::new(NAMES[i], FileChange::new(kind, a, d)))
                .collect()
        })
}

fn history_strategy() -> impl Strategy<Value = Vec<Vec<NamedFileChange>>> {
    prop::collection::vec(transition_strategy(), 1..8)
}

proptest! {
    #[test]
    fn every_row_has_one_slot_per_transition(history in history_strategy()) {
        let rows = consolidate(&history);
        for row in &rows {
            prop_assert_eq!(row.changes.len(), history.len());
        }
    }

    #[test]
    fn rows_cover_exactly_the_changed_filenames(history in history_strategy()) {
        let rows = consolidate(&history);
        let expected: HashSet<&str> = history
            .iter()
            .flatten()
            .map(|c| c.filename.as_str())
            .collect();
        let actual: HashSet<&str> = rows.iter().map(|r| r.filename.as_str()).collect();
        prop_assert_eq!(rows.len(), actual.len());
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn changed_slots_echo_their_transition(history in history_strategy()) {
        let rows = consolidate(&history);
        for row in &rows {
            for (i, slot) in row.changes.iter().enumerate() {
                let entry = history[i].iter().find(|c| c.filename == row.filename);
                match (entry, slot) {
                    (Some(c), Slot::Changed(change)) => prop_assert_eq!(&c.change, change),
                    (Some(_), other) => prop_assert!(false, "expected change, got {:?}", other),
                    (None, Slot::Changed(_)) => prop_assert!(false, "change without entry"),
                    (None, _) => {}
                }
            }
        }
    }

    #[test]
    fn unchanged_only_follows_a_live_file(history in history_strategy()) {
        let rows = consolidate(&history);
        for row in &rows {
            let mut exists = false;
            for slot in &row.changes {
                match slot {
                    Slot::Unchanged => prop_assert!(exists),
                    Slot::Absent => prop_assert!(!exists),
                    Slot::Changed(change) => {
                        exists = change.kind != ChangeKind::Deletion;
                    }
                }
            }
        }
    }

    #[test]
    fn consolidation_is_deterministic(history in history_strategy()) {
        prop_assert_eq!(consolidate(&history), consolidate(&history));
    }
}
