//! Rendering of consolidated tables
//!
//! Presentation concerns only: labels, grouping and output formats. The core
//! hands over a [`ConsolidatedTable`] and never sees any of this.

use crate::error::ApiError;
use crate::types::{ChangeKind, ConsolidatedRow, ConsolidatedTable};
use serde::{Deserialize, Serialize};

pub mod html;
pub mod json;
pub mod table;

pub const DEFAULT_TITLE: &str = "Directory Diff/Change Renderer";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Html,
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Invalid output format: {} (must be 'html', 'table', or 'json')",
                other
            )),
        }
    }
}

/// Rendering options
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// One section per top-level folder
    pub group_by_folder: bool,
    pub title: String,
    /// Colored terminal output (table format only)
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            group_by_folder: false,
            title: DEFAULT_TITLE.to_string(),
            color: false,
        }
    }
}

/// Human label for a change kind
pub fn participle(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Creation => "Created",
        ChangeKind::Deletion => "Deleted",
        ChangeKind::Modification => "Modified",
        ChangeKind::NoOp => "Unmodified",
    }
}

/// Rows split for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedRows {
    /// Rows with no folder, shown first and flat
    pub root: Vec<ConsolidatedRow>,
    /// `(folder, rows)` in first-seen order; filenames have `folder/` stripped
    pub sections: Vec<(String, Vec<ConsolidatedRow>)>,
}

/// Group rows by their first path segment
pub fn group_rows(rows: &[ConsolidatedRow]) -> GroupedRows {
    let mut grouped = GroupedRows {
        root: Vec::new(),
        sections: Vec::new(),
    };

    for row in rows {
        match row.filename.split_once('/') {
            None => grouped.root.push(row.clone()),
            Some((folder, rest)) => {
                let stripped = ConsolidatedRow {
                    filename: rest.to_string(),
                    changes: row.changes.clone(),
                };
                match grouped.sections.iter_mut().find(|(name, _)| name == folder) {
                    Some((_, section)) => section.push(stripped),
                    None => grouped.sections.push((folder.to_string(), vec![stripped])),
                }
            }
        }
    }

    grouped
}

/// `my_lib-src` → `My Lib Src`
pub fn capital_case(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in name.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev_lower = c.is_lowercase() || c.is_numeric();
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Render a table in the requested format
pub fn render(
    consolidated: &ConsolidatedTable,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String, ApiError> {
    match format {
        OutputFormat::Html => html::render_html(consolidated, options)
            .map_err(|e| ApiError::RenderError(format!("HTML formatting failed: {}", e))),
        OutputFormat::Table => Ok(table::render_table(consolidated, options)),
        OutputFormat::Json => json::render_json(consolidated),
    }
}
