//! Integration tests for the full pipeline over real directories (walk back-end)

use super::test_utils::SnapshotSeries;
use dirtrail::{
    consolidate_across_directories, ChangeKind, ConsolidationOptions, DiffError, FileChange, Slot,
    WalkDiffer,
};

fn changed(kind: ChangeKind, additions: u64, deletions: u64) -> Slot {
    Slot::Changed(FileChange::new(kind, additions, deletions))
}

fn release_series() -> SnapshotSeries {
    SnapshotSeries::new()
        .snapshot(
            "v1",
            &[
                ("README.md", "# demo\n"),
                ("src/lib.rs", "pub fn a() {}\n"),
                ("notes.txt", "one\ntwo\n"),
            ],
        )
        .snapshot(
            "v2",
            &[
                ("README.md", "# demo\n"),
                ("src/lib.rs", "pub fn a() {}\npub fn b() {}\n"),
                ("src/util.rs", "// util\n"),
            ],
        )
        .snapshot(
            "v3",
            &[
                ("README.md", "# demo\nmore\n"),
                ("src/lib.rs", "pub fn a() {}\npub fn b() {}\n"),
                ("src/util.rs", "// util\n"),
                ("notes.txt", "back\n"),
            ],
        )
}

#[tokio::test]
async fn test_pipeline_with_synthetic_start() {
    let series = release_series();
    let table = consolidate_across_directories(
        WalkDiffer::new(),
        series.dirs(),
        ConsolidationOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(table.transitions, vec!["∅ → v1", "v1 → v2", "v2 → v3"]);

    let names: Vec<_> = table.rows.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, vec!["notes.txt", "README.md", "src/lib.rs", "src/util.rs"]);

    let notes = &table.rows[0];
    assert_eq!(
        notes.changes,
        vec![
            changed(ChangeKind::Creation, 2, 0),
            changed(ChangeKind::Deletion, 0, 2),
            changed(ChangeKind::Creation, 1, 0),
        ]
    );

    let readme = &table.rows[1];
    assert_eq!(
        readme.changes,
        vec![
            changed(ChangeKind::Creation, 1, 0),
            Slot::Unchanged,
            changed(ChangeKind::Modification, 1, 0),
        ]
    );

    let lib = &table.rows[2];
    assert_eq!(
        lib.changes,
        vec![
            changed(ChangeKind::Creation, 1, 0),
            changed(ChangeKind::Modification, 1, 0),
            Slot::Unchanged,
        ]
    );

    let util = &table.rows[3];
    assert_eq!(
        util.changes,
        vec![Slot::Absent, changed(ChangeKind::Creation, 1, 0), Slot::Unchanged]
    );
}

#[tokio::test]
async fn test_pipeline_without_synthetic_start() {
    let series = release_series();
    let options = ConsolidationOptions {
        prepend_synthetic_empty: false,
        parallel: false,
    };
    let table = consolidate_across_directories(WalkDiffer::new(), series.dirs(), options)
        .await
        .unwrap();

    assert_eq!(table.transition_count(), 2);
    // README.md and src/lib.rs pre-date the first transition; untouched slots
    // before their first change have no history to carry.
    let readme = table.rows.iter().find(|r| r.filename == "README.md").unwrap();
    assert_eq!(
        readme.changes,
        vec![Slot::Absent, changed(ChangeKind::Modification, 1, 0)]
    );
}

#[tokio::test]
async fn test_identical_snapshots_yield_no_rows() {
    let series = SnapshotSeries::new()
        .snapshot("a", &[("x.txt", "same\n")])
        .snapshot("b", &[("x.txt", "same\n")]);
    let options = ConsolidationOptions {
        prepend_synthetic_empty: false,
        parallel: false,
    };
    let table = consolidate_across_directories(WalkDiffer::new(), series.dirs(), options)
        .await
        .unwrap();
    assert!(table.is_empty());
    assert_eq!(table.transition_count(), 1);
}

#[tokio::test]
async fn test_parallel_matches_sequential_on_disk() {
    let series = release_series();
    let sequential = consolidate_across_directories(
        WalkDiffer::new(),
        series.dirs(),
        ConsolidationOptions::default(),
    )
    .await
    .unwrap();
    let parallel = consolidate_across_directories(
        WalkDiffer::new(),
        series.dirs(),
        ConsolidationOptions {
            prepend_synthetic_empty: true,
            parallel: true,
        },
    )
    .await
    .unwrap();
    assert_eq!(sequential, parallel);
}

#[tokio::test]
async fn test_missing_snapshot_aborts() {
    let series = release_series();
    let mut dirs = series.dirs().to_vec();
    dirs.insert(1, series.root().join("not-there"));

    let err = consolidate_across_directories(WalkDiffer::new(), &dirs, ConsolidationOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DiffError::ExtractionFailure { .. }));
}

#[tokio::test]
async fn test_empty_directory_list_rejected() {
    let err = consolidate_across_directories(WalkDiffer::new(), &[], ConsolidationOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DiffError::InvalidInput(_)));
}
