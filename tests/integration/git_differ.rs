//! Git back-end against real directories; skipped when git is not installed

use super::test_utils::{git_available, SnapshotSeries};
use dirtrail::{
    consolidate_across_directories, ChangeExtractor, ChangeKind, ConsolidationOptions, FileChange,
    GitNumstatDiffer, NamedFileChange, Slot, WalkDiffer,
};

#[tokio::test]
async fn test_git_extraction_classifies_each_change() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }

    let series = SnapshotSeries::new()
        .snapshot(
            "v1",
            &[("keep.txt", "a\nb\n"), ("gone.txt", "x\n"), ("src/m.txt", "1\n")],
        )
        .snapshot(
            "v2",
            &[("keep.txt", "a\nb\n"), ("new.txt", "fresh\n"), ("src/m.txt", "1\n2\n3\n")],
        );
    let dirs = series.dirs();

    let extractor = ChangeExtractor::new(GitNumstatDiffer::new());
    let changes = extractor.extract_changes(&dirs[0], &dirs[1]).await.unwrap();

    assert_eq!(
        changes,
        vec![
            NamedFileChange::new("gone.txt", FileChange::new(ChangeKind::Deletion, 0, 1)),
            NamedFileChange::new("new.txt", FileChange::new(ChangeKind::Creation, 1, 0)),
            NamedFileChange::new("src/m.txt", FileChange::new(ChangeKind::Modification, 2, 0)),
        ]
    );
}

#[tokio::test]
async fn test_git_binary_files() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }

    let series = SnapshotSeries::new()
        .snapshot("v1", &[])
        .snapshot("v2", &[("blob.dat", "\0\u{1}\u{2}binary")]);
    let dirs = series.dirs();

    let extractor = ChangeExtractor::new(GitNumstatDiffer::new());
    let changes = extractor.extract_changes(&dirs[0], &dirs[1]).await.unwrap();

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].filename, "blob.dat");
    assert_eq!(changes[0].change, FileChange::binary(ChangeKind::Creation));
}

#[tokio::test]
async fn test_git_and_walk_agree_on_text_snapshots() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }

    let series = SnapshotSeries::new()
        .snapshot("v1", &[("a.txt", "1\n2\n"), ("docs/guide.md", "# guide\n")])
        .snapshot("v2", &[("a.txt", "1\n2\n3\n"), ("b.txt", "b\n")])
        .snapshot("v3", &[("a.txt", "1\n3\n"), ("b.txt", "b\n"), ("docs/guide.md", "# again\n")]);

    let from_git = consolidate_across_directories(
        GitNumstatDiffer::new(),
        series.dirs(),
        ConsolidationOptions::default(),
    )
    .await
    .unwrap();
    let from_walk = consolidate_across_directories(
        WalkDiffer::new(),
        series.dirs(),
        ConsolidationOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(from_git, from_walk);

    let guide = from_git
        .rows
        .iter()
        .find(|r| r.filename == "docs/guide.md")
        .unwrap();
    assert_eq!(
        guide.changes,
        vec![
            Slot::Changed(FileChange::new(ChangeKind::Creation, 1, 0)),
            Slot::Changed(FileChange::new(ChangeKind::Deletion, 0, 1)),
            Slot::Changed(FileChange::new(ChangeKind::Creation, 1, 0)),
        ]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_git_filenames_with_braces_quotes_and_spaces() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }

    let series = SnapshotSeries::new()
        .snapshot("v1", &[("tpl/{{name}}.txt", "a\n")])
        .snapshot(
            "v2",
            &[
                ("tpl/{{name}}.txt", "a\nb\n"),
                ("we\"ird.txt", "x\n"),
                ("back\\slash.txt", "y\n"),
                ("trail ", "z\n"),
            ],
        );

    let from_git = consolidate_across_directories(
        GitNumstatDiffer::new(),
        series.dirs(),
        ConsolidationOptions {
            prepend_synthetic_empty: false,
            parallel: false,
        },
    )
    .await
    .unwrap();

    let names: Vec<_> = from_git.rows.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(
        names,
        vec!["back\\slash.txt", "tpl/{{name}}.txt", "trail ", "we\"ird.txt"]
    );
    let template = &from_git.rows[1];
    assert_eq!(
        template.changes,
        vec![Slot::Changed(FileChange::new(ChangeKind::Modification, 1, 0))]
    );
    let quoted = &from_git.rows[3];
    assert_eq!(
        quoted.changes,
        vec![Slot::Changed(FileChange::new(ChangeKind::Creation, 1, 0))]
    );
}
