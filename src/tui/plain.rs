//! Plain-text rendering of the grid for `--print`.

use crate::app::AppState;
use crate::cell::CellRender;
use crate::grid::VersionHeader;
use crate::model::Task;

pub fn render_text(state: &AppState) -> String {
    let grid = state.grid();
    let mut out = String::new();

    let mut header = vec!["Variant".to_string()];
    header.extend(grid.headers.iter().map(header_text));
    out.push_str(&header.join(" | "));
    out.push('\n');

    if grid.is_empty() {
        out.push_str("(no variants)\n");
    }

    for row in &grid.rows {
        let mut line = vec![row.variant.display_name.clone()];
        line.extend(row.cells.iter().map(cell_text));
        out.push_str(&line.join(" | "));
        out.push('\n');
    }

    let newer = state.newer_url();
    let older = state.older_url();
    out.push_str(&format!(
        "newer: {}  older: {}\n",
        or_disabled(&newer),
        or_disabled(&older)
    ));
    out
}

fn header_text(header: &VersionHeader) -> String {
    match header {
        VersionHeader::Active(h) => {
            let mut parts = vec![h.hash.as_str()];
            if !h.time.is_empty() {
                parts.push(&h.time);
            }
            parts.push(&h.author);
            format!("{} - {}", parts.join(" "), h.message)
        }
        VersionHeader::RolledUp(h) => h.label.clone(),
    }
}

fn cell_text(cell: &CellRender<'_>) -> String {
    match cell {
        CellRender::Inactive => "inactive build".to_string(),
        CellRender::Expanded { tasks } if tasks.is_empty() => "-".to_string(),
        CellRender::Expanded { tasks } => task_list(tasks),
        CellRender::Collapsed { attention, summary } => {
            let mut parts: Vec<String> = Vec::new();
            if !attention.is_empty() {
                parts.push(task_list(attention));
            }
            parts.extend(
                summary
                    .iter()
                    .map(|u| format!("{} {}", u.label(), u.category.label())),
            );
            if parts.is_empty() {
                "-".to_string()
            } else {
                parts.join(" ")
            }
        }
    }
}

fn task_list(tasks: &[&Task]) -> String {
    tasks
        .iter()
        .map(|t| format!("{}:{}", t.display_name, t.status))
        .collect::<Vec<_>>()
        .join(" ")
}

fn or_disabled(url: &str) -> &str {
    if url.is_empty() {
        "(disabled)"
    } else {
        url
    }
}
