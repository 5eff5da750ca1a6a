//! Terminal table renderer

use super::{capital_case, group_rows, participle, RenderOptions};
use crate::types::{ChangeKind, ConsolidatedRow, ConsolidatedTable, Slot};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Render the consolidated table for a terminal
pub fn render_table(consolidated: &ConsolidatedTable, options: &RenderOptions) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);

    let mut header = vec!["File".to_string()];
    header.extend(consolidated.transitions.iter().cloned());
    table.set_header(header);

    if options.group_by_folder {
        let grouped = group_rows(&consolidated.rows);
        for row in &grouped.root {
            table.add_row(row_cells(row, options.color));
        }
        for (folder, rows) in &grouped.sections {
            table.add_row(vec![section_title(folder, options.color)]);
            for row in rows {
                table.add_row(row_cells(row, options.color));
            }
        }
    } else {
        for row in &consolidated.rows {
            table.add_row(row_cells(row, options.color));
        }
    }

    let mut out = String::new();
    if !options.title.is_empty() {
        out.push_str(&heading(&options.title, options.color));
        out.push_str("\n\n");
    }
    out.push_str(&table.to_string());
    out.push('\n');
    out
}

fn heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

fn section_title(folder: &str, color: bool) -> String {
    let title = capital_case(folder);
    if color {
        format!("{}", title.bold())
    } else {
        title
    }
}

fn row_cells(row: &ConsolidatedRow, color: bool) -> Vec<String> {
    let mut cells = vec![row.filename.clone()];
    cells.extend(row.changes.iter().map(|slot| slot_text(slot, color)));
    cells
}

/// `Created +5 -0`, `Unmodified`, or empty for absent slots
pub fn slot_text(slot: &Slot, color: bool) -> String {
    let Some(kind) = slot.kind() else {
        return String::new();
    };
    let text = match slot {
        Slot::Changed(change) if change.binary => format!("{} (binary)", participle(kind)),
        Slot::Changed(change) => format!(
            "{} +{} -{}",
            participle(kind),
            change.additions,
            change.deletions
        ),
        Slot::Unchanged | Slot::Absent => participle(kind).to_string(),
    };

    if !color {
        return text;
    }
    match kind {
        ChangeKind::Creation => format!("{}", text.green()),
        ChangeKind::Deletion => format!("{}", text.red()),
        ChangeKind::Modification => format!("{}", text.yellow()),
        ChangeKind::NoOp => format!("{}", text.dimmed()),
    }
}
