//! Snapshot walker for listing the files of one directory snapshot

use crate::error::DiffError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A regular file inside a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    /// Path relative to the snapshot root, `/`-separated
    pub relative: String,
    /// Absolute (or root-joined) path used for reading
    pub path: PathBuf,
}

/// Snapshot walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false for determinism)
    pub follow_symlinks: bool,
    /// Path components to skip entirely (e.g., ".git")
    pub ignore_names: Vec<String>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_names: vec![".git".to_string()],
        }
    }
}

/// Snapshot walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the snapshot and collect every regular file
    ///
    /// Returns files sorted by relative path for determinism.
    pub fn walk(&self) -> Result<Vec<SnapshotFile>, std::io::Error> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.should_ignore(entry));

        for entry in walker {
            let entry = entry.map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to walk directory: {}", e),
                )
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = relative_string(&self.root, entry.path())?;
            files.push(SnapshotFile {
                relative,
                path: entry.path().to_path_buf(),
            });
        }

        files.sort_by(|a, b| a.relative.cmp(&b.relative));
        Ok(files)
    }

    fn should_ignore(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_names
            .iter()
            .any(|pattern| pattern.as_str() == name)
    }
}

/// Check that a snapshot root exists and is a directory
pub fn ensure_directory(root: &Path, before: &Path, after: &Path) -> Result<(), DiffError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(DiffError::extraction(
            before,
            after,
            format!("{} is not a directory", root.display()),
        )),
        Err(e) => Err(DiffError::extraction(
            before,
            after,
            format!("cannot access {}: {}", root.display(), e),
        )),
    }
}

fn relative_string(root: &Path, path: &Path) -> Result<String, std::io::Error> {
    let relative = path.strip_prefix(root).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("{:?} is outside of {:?}", path, root),
        )
    })?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
