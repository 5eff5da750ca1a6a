//! `git diff -z --numstat --no-index` back-end

use super::{numstat, DiffReport, DirectoryDiffer};
use crate::error::DiffError;
use crate::snapshot::walker::ensure_directory;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Differ that shells out to git in no-index mode
#[derive(Debug, Clone)]
pub struct GitNumstatDiffer {
    git_binary: String,
}

impl Default for GitNumstatDiffer {
    fn default() -> Self {
        Self::with_binary("git")
    }
}

impl GitNumstatDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific git executable
    pub fn with_binary(git_binary: impl Into<String>) -> Self {
        Self {
            git_binary: git_binary.into(),
        }
    }

    fn command(&self, before: &Path, after: &Path) -> Command {
        let mut cmd = Command::new(&self.git_binary);
        cmd.args([
            "-c",
            "core.quotepath=off",
            "diff",
            "-z",
            "--numstat",
            "--no-index",
            "--no-renames",
        ])
        .arg(before)
        .arg(after)
        .env("GIT_TERMINAL_PROMPT", "0")
        .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl DirectoryDiffer for GitNumstatDiffer {
    #[instrument(skip(self), fields(backend = "git"))]
    async fn diff(&self, before: &Path, after: &Path) -> Result<DiffReport, DiffError> {
        ensure_directory(before, before, after)?;
        ensure_directory(after, before, after)?;

        let output = self.command(before, after).output().await.map_err(|e| {
            DiffError::extraction(
                before,
                after,
                format!("failed to run {}: {}", self.git_binary, e),
            )
        })?;

        // --no-index exits 1 both when the trees differ and on access errors
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        match output.status.code() {
            Some(0) | Some(1) if !reports_error(&stderr) => {}
            code => {
                return Err(DiffError::extraction(
                    before,
                    after,
                    format!("git exited with {:?}: {}", code, stderr),
                ));
            }
        }
        if !stderr.is_empty() {
            warn!(stderr = %stderr, "git reported warnings");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let report = numstat::parse_z_report(&stdout)?;
        debug!(entries = report.len(), "git numstat report parsed");
        Ok(report)
    }

    fn name(&self) -> &str {
        "git"
    }
}

fn reports_error(stderr: &str) -> bool {
    stderr
        .lines()
        .any(|line| line.starts_with("error:") || line.starts_with("fatal:"))
}
