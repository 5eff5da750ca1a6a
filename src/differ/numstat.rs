//! Parsers for `git diff --numstat` reports
//!
//! Text form: each line is `<added>\t<removed>\t<pathspec>`. The path spec is
//! either a plain path, a bare rename `before => after`, or git's compact
//! rename form `prefix{before => after}suffix`. Paths with unusual characters
//! come back C-quoted in this form, so the git back-end reads the `-z` form
//! instead ([`parse_z_report`]), where paths are raw.

use super::{DiffReport, LineCount, RawDiffEntry, NULL_DEVICE};
use crate::error::DiffError;
use regex::Regex;
use std::sync::OnceLock;

const RENAME_ARROW: &str = " => ";

fn compact_rename() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(.*)\{([^{}]*) => ([^{}]*)\}(.*)$").expect("compact rename pattern is valid")
    })
}

/// Parse a whole numstat report. Empty text yields an empty report.
pub fn parse_report(text: &str) -> Result<DiffReport, DiffError> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

/// Parse a single numstat line
pub fn parse_line(line: &str) -> Result<RawDiffEntry, DiffError> {
    let mut fields = line.splitn(3, '\t');
    let (added, removed, spec) = match (fields.next(), fields.next(), fields.next()) {
        (Some(a), Some(r), Some(p)) => (a, r, p),
        _ => {
            return Err(DiffError::malformed(
                line,
                "expected three tab-separated fields",
            ))
        }
    };

    let (before, after) = expand_path_spec(line, spec)?;
    build_entry(
        line.to_string(),
        parse_count(line, added)?,
        parse_count(line, removed)?,
        before,
        after,
    )
}

/// Parse the NUL-terminated output of `git diff -z --numstat`
///
/// A record is `<added>\t<removed>\t<path>\0` when both sides share a path,
/// or `<added>\t<removed>\t\0<before>\0<after>\0` otherwise.
pub fn parse_z_report(text: &str) -> Result<DiffReport, DiffError> {
    let body = text.strip_suffix('\0').unwrap_or(text);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut fields = body.split('\0');
    let mut report = Vec::new();
    while let Some(head) = fields.next() {
        let mut parts = head.splitn(3, '\t');
        let (added, removed, path) = match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(r), Some(p)) => (a, r, p),
            _ => {
                return Err(DiffError::malformed(
                    head,
                    "expected three tab-separated fields",
                ))
            }
        };

        let (before, after) = if path.is_empty() {
            match (fields.next(), fields.next()) {
                (Some(b), Some(a)) if !b.is_empty() && !a.is_empty() => {
                    (b.to_string(), a.to_string())
                }
                _ => return Err(DiffError::malformed(head, "incomplete path pair")),
            }
        } else {
            (path.to_string(), path.to_string())
        };

        let source = format!("{}\t{}\t{} => {}", added, removed, before, after);
        report.push(build_entry(
            source.clone(),
            parse_count(&source, added)?,
            parse_count(&source, removed)?,
            before,
            after,
        )?);
    }

    Ok(report)
}

fn build_entry(
    source: String,
    additions: LineCount,
    deletions: LineCount,
    before: String,
    after: String,
) -> Result<RawDiffEntry, DiffError> {
    let before = sentinel_to_none(before);
    let after = sentinel_to_none(after);
    if before.is_none() && after.is_none() {
        return Err(DiffError::malformed(source, "both sides are the null device"));
    }

    Ok(RawDiffEntry {
        additions,
        deletions,
        before,
        after,
        source,
    })
}

fn parse_count(line: &str, field: &str) -> Result<LineCount, DiffError> {
    if field == "-" {
        return Ok(LineCount::Binary);
    }
    field
        .parse::<u64>()
        .map(LineCount::Lines)
        .map_err(|_| DiffError::malformed(line, format!("invalid line count {:?}", field)))
}

/// Expand a path spec into its `(before, after)` paths
///
/// `src/{old => new}/file.ts` becomes `src/old/file.ts` and `src/new/file.ts`.
pub fn expand_path_spec(line: &str, spec: &str) -> Result<(String, String), DiffError> {
    if spec.is_empty() {
        return Err(DiffError::malformed(line, "empty path"));
    }
    if !spec.contains(RENAME_ARROW) {
        return Ok((spec.to_string(), spec.to_string()));
    }

    if spec.contains('{') || spec.contains('}') {
        let captures = compact_rename()
            .captures(spec)
            .ok_or_else(|| DiffError::malformed(line, "unbalanced rename braces"))?;
        let prefix = &captures[1];
        let suffix = &captures[4];
        let before = format!("{}{}{}", prefix, &captures[2], suffix);
        let after = format!("{}{}{}", prefix, &captures[3], suffix);
        return Ok((before, after));
    }

    match spec.split_once(RENAME_ARROW) {
        Some((before, after)) if !before.is_empty() && !after.is_empty() => {
            Ok((before.to_string(), after.to_string()))
        }
        _ => Err(DiffError::malformed(line, "rename with an empty side")),
    }
}

fn sentinel_to_none(path: String) -> Option<String> {
    if path == NULL_DEVICE {
        None
    } else {
        Some(path)
    }
}
