//! Path normalization and filename collation utilities

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a snapshot root so it can be validated and labelled
///
/// Uses dunce so Windows paths stay in their familiar (non-UNC) form.
pub fn canonicalize_root(path: &Path) -> Result<PathBuf, std::io::Error> {
    dunce::canonicalize(path)
}

/// Render a directory argument the way it is handed to a differ
///
/// Trailing separators are removed (except for the filesystem root) so that
/// `<root>/<relative>` prefixes line up with what the differ reports.
pub fn normalize_root_string(path: &Path) -> String {
    let mut result = path.to_string_lossy().replace('\\', "/");
    while result.len() > 1 && result.ends_with('/') {
        result.pop();
    }
    result
}

/// Prefix every reported path under `root` starts with
pub fn root_prefix(root: &str) -> String {
    if root.ends_with('/') {
        root.to_string()
    } else {
        format!("{}/", root)
    }
}

/// Join a normalized root and a relative filename the way differs report it
pub fn join_reported(root: &str, relative: &str) -> String {
    format!("{}{}", root_prefix(root), relative)
}

/// Short label for a snapshot root: its final component, or the whole path
pub fn root_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| normalize_root_string(path))
}

/// Total order used for every filename sort
///
/// Case-insensitive comparison of the NFC forms first, then lowercase before
/// uppercase at the first differing character, then raw byte order.
pub fn compare_filenames(a: &str, b: &str) -> Ordering {
    let a_norm: String = a.nfc().collect();
    let b_norm: String = b.nfc().collect();

    let folded_a = a_norm.chars().flat_map(char::to_lowercase);
    let folded_b = b_norm.chars().flat_map(char::to_lowercase);

    folded_a
        .cmp(folded_b)
        .then_with(|| case_order(&a_norm, &b_norm))
        .then_with(|| a.cmp(b))
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
