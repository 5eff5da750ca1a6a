//! Standalone HTML document renderer

use super::{capital_case, group_rows, participle, RenderOptions};
use crate::types::{ChangeKind, ConsolidatedRow, ConsolidatedTable, Slot};
use std::fmt::{self, Write};

const STYLES: &str = "table {
    border-collapse: collapse;
    border-width: 0;
  }
  td, th {
    padding: 4px 12px;
  }
  td.additions,
  td.deletions {
    text-align: right;
  }
  td.creation {
    background-color: #eeffee;
  }
  td.deletion {
    background-color: #ffeeee;
  }
  td.modification {
    background-color: #eeeeee;
  }
  span.some-additions,
  td.change.creation {
    color: #28a745;
  }
  span.some-additions:before,
  span.no-additions:before {
    content: '+';
  }
  span.some-deletions,
  td.change.deletion {
    color: #cb2431;
  }
  span.some-deletions:before,
  span.no-deletions:before {
    content: '-';
  }
  td.change.none,
  span.no-additions,
  span.no-deletions {
    color: #888888;
  }";

/// Render the whole document
pub fn render_html(
    table: &ConsolidatedTable,
    options: &RenderOptions,
) -> Result<String, fmt::Error> {
    let title = escape(&options.title);
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    writeln!(out, "<meta charset=\"utf-8\">\n<title>{}</title>", title)?;
    writeln!(out, "<style>\n  {}\n</style>", STYLES)?;
    out.push_str("</head>\n<body>\n");
    writeln!(out, "<h1>{}</h1>", title)?;
    out.push_str(&render_table(table, options.group_by_folder)?);
    out.push_str("</body>\n</html>\n");
    Ok(out)
}

fn render_table(table: &ConsolidatedTable, group_by_folder: bool) -> Result<String, fmt::Error> {
    let mut out = String::from("<table>\n");
    if !table.transitions.is_empty() {
        out.push_str("<tr>\n<th></th>\n");
        for label in &table.transitions {
            writeln!(out, "<th colspan=\"3\">{}</th>", escape(label))?;
        }
        out.push_str("</tr>\n");
    }

    if group_by_folder {
        let grouped = group_rows(&table.rows);
        for row in &grouped.root {
            out.push_str(&render_row(row)?);
        }
        for (folder, rows) in &grouped.sections {
            writeln!(
                out,
                "<tr>\n<td><h3>{}</h3></td>\n</tr>",
                escape(&capital_case(folder))
            )?;
            for row in rows {
                out.push_str(&render_row(row)?);
            }
        }
    } else {
        for row in &table.rows {
            out.push_str(&render_row(row)?);
        }
    }

    out.push_str("</table>\n");
    Ok(out)
}

fn render_row(row: &ConsolidatedRow) -> Result<String, fmt::Error> {
    let mut out = String::from("<tr>\n");
    writeln!(out, "<td class=\"filename\">{}</td>", escape(&row.filename))?;
    for slot in &row.changes {
        out.push_str(&render_slot(slot)?);
    }
    out.push_str("</tr>\n");
    Ok(out)
}

fn render_slot(slot: &Slot) -> Result<String, fmt::Error> {
    match slot {
        Slot::Absent => Ok("<td class=\"change null\" colspan=\"3\"></td>\n".to_string()),
        Slot::Unchanged => render_cells(ChangeKind::NoOp, "0", "0", false, false),
        Slot::Changed(change) if change.binary => {
            render_cells(change.kind, "bin", "bin", false, false)
        }
        Slot::Changed(change) => render_cells(
            change.kind,
            &change.additions.to_string(),
            &change.deletions.to_string(),
            change.additions > 0,
            change.deletions > 0,
        ),
    }
}

fn render_cells(
    kind: ChangeKind,
    additions: &str,
    deletions: &str,
    some_additions: bool,
    some_deletions: bool,
) -> Result<String, fmt::Error> {
    let class = kind.tag();
    let mut out = String::new();
    writeln!(
        out,
        "<td class=\"change {}\">{}</td>",
        class,
        participle(kind)
    )?;
    writeln!(
        out,
        "<td class=\"additions {}\"><span class=\"{}\">{}</span></td>",
        class,
        if some_additions { "some-additions" } else { "no-additions" },
        additions
    )?;
    writeln!(
        out,
        "<td class=\"deletions {}\"><span class=\"{}\">{}</span></td>",
        class,
        if some_deletions { "some-deletions" } else { "no-deletions" },
        deletions
    )?;
    Ok(out)
}

/// Minimal HTML text escaping
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
