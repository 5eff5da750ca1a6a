//! CLI output: error mapping and writing the rendered document.

use crate::error::{ApiError, DiffError};
use std::io::Write;
use std::path::Path;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Diff(DiffError::MalformedReportEntry { line, reason }) => format!(
            "The differ produced an entry that could not be parsed ({}): {}",
            reason, line
        ),
        other => other.to_string(),
    }
}

/// Write the rendered document to `path`, or stdout when `None`.
pub fn write_output(rendered: &str, path: Option<&Path>) -> Result<(), ApiError> {
    match path {
        Some(path) => std::fs::write(path, rendered).map_err(ApiError::Io),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                handle.write_all(b"\n")?;
            }
            handle.flush()?;
            Ok(())
        }
    }
}
